//! TMC API client layer
//!
//! One shared HTTP transport with the standard default headers, a CSP
//! credentials exchanger, and one service per API resource group, all
//! composed by [`client::TmcClient`].
//!
//! Control flow for a single operation: resource handler builds a model,
//! hands it to a service here, the service validates identifying fields and
//! builds the request URL, and the transport performs one JSON round trip.

pub mod akscluster;
pub mod auth;
pub mod client;
pub mod cluster;
pub mod clustergroup;
pub mod http;
pub mod inspections;
pub mod managementcluster;
pub mod namespace;
pub mod provisioner;
pub mod workspace;

pub use auth::CspCredentials;
pub use client::TmcClient;
pub use http::ClientError;
