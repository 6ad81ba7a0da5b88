//! Declarative resource management for VMware Tanzu Mission Control.
//!
//! The crate is layered the way a request flows: a resource handler in
//! [`resource`] builds an API model from schema state, hands it to the
//! matching service in [`tmc`], which validates identifying fields, builds
//! the request URL, and performs one JSON round trip over the shared
//! transport. Responses flow back through the same layers, flattened into
//! schema state.

pub mod config;
pub mod model;
pub mod resource;
pub mod tmc;
