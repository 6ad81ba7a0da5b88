//! API models for Tanzu Mission Control resources
//!
//! Each submodule mirrors one resource group of the TMC REST API: the
//! composite full name identifying an instance, the resource body itself,
//! and the request/response envelopes the endpoints exchange.

pub mod akscluster;
pub mod cluster;
pub mod clustergroup;
pub mod common;
pub mod inspections;
pub mod managementcluster;
pub mod namespace;
pub mod provisioner;
pub mod workspace;
