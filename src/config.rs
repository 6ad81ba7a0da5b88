//! Configuration Management
//!
//! Credentials come from the environment; CLI defaults (last used
//! management cluster and provisioner) persist in a small JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Org endpoint, e.g. `myorg.tmc.cloud.vmware.com`.
pub const TMC_ENDPOINT_ENV: &str = "TMC_ENDPOINT";
/// VMware Cloud Services endpoint the API token is exchanged against.
pub const CLOUD_ENDPOINT_ENV: &str = "VMW_CLOUD_ENDPOINT";
/// Long-lived API token.
pub const API_TOKEN_ENV: &str = "VMW_CLOUD_API_TOKEN";

pub const DEFAULT_CLOUD_ENDPOINT: &str = "console.cloud.vmware.com";

/// Scope defaults for clusters attached without a dedicated infrastructure.
const DEFAULT_MANAGEMENT_CLUSTER: &str = "attached";
const DEFAULT_PROVISIONER: &str = "attached";

/// Authentication context resolved from the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub cloud_endpoint: String,
    pub api_token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(TMC_ENDPOINT_ENV)
            .with_context(|| format!("{TMC_ENDPOINT_ENV} is not set"))?;
        let api_token = std::env::var(API_TOKEN_ENV)
            .with_context(|| format!("{API_TOKEN_ENV} is not set"))?;
        let cloud_endpoint = std::env::var(CLOUD_ENDPOINT_ENV)
            .unwrap_or_else(|_| DEFAULT_CLOUD_ENDPOINT.to_string());

        Ok(Self {
            endpoint,
            cloud_endpoint: normalize_cloud_endpoint(&cloud_endpoint),
            api_token,
        })
    }
}

fn normalize_cloud_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", endpoint.trim_end_matches('/'))
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Last used management cluster
    #[serde(default)]
    pub management_cluster: Option<String>,
    /// Last used provisioner
    #[serde(default)]
    pub provisioner: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tmc-provider").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective management cluster (CLI > config > attached default)
    pub fn effective_management_cluster(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.management_cluster.clone())
            .unwrap_or_else(|| DEFAULT_MANAGEMENT_CLUSTER.to_string())
    }

    /// Get effective provisioner (CLI > config > attached default)
    pub fn effective_provisioner(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.provisioner.clone())
            .unwrap_or_else(|| DEFAULT_PROVISIONER.to_string())
    }

    /// Set management cluster and save
    pub fn set_management_cluster(&mut self, name: &str) -> Result<()> {
        self.management_cluster = Some(name.to_string());
        self.save()
    }

    /// Set provisioner and save
    pub fn set_provisioner(&mut self, name: &str) -> Result<()> {
        self.provisioner = Some(name.to_string());
        self.save()
    }
}
