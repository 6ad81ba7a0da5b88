use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

use tmc_provider::config::{Config, Credentials};
use tmc_provider::model::akscluster::AksClusterFullName;
use tmc_provider::model::cluster::ClusterFullName;
use tmc_provider::model::inspections::InspectionScanFullName;
use tmc_provider::model::managementcluster::ManagementClusterFullName;
use tmc_provider::model::namespace::NamespaceFullName;
use tmc_provider::model::provisioner::ProvisionerFullName;
use tmc_provider::resource;
use tmc_provider::resource::akscluster::to_cluster_map;
use tmc_provider::tmc::{CspCredentials, TmcClient};

/// Version injected at compile time via TMC_PROVIDER_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("TMC_PROVIDER_VERSION") {
    Some(v) => v,
    None => "dev",
};

/// Operator CLI for Tanzu Mission Control
#[derive(Parser, Debug)]
#[command(name = "tmc-provider", version = VERSION, about, long_about = None)]
struct Args {
    /// Management cluster scope
    #[arg(short, long)]
    management_cluster: Option<String>,

    /// Provisioner scope
    #[arg(short, long)]
    provisioner: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List provisioners under the management cluster
    Provisioners {
        /// Narrow the search scope to one name
        name: Option<String>,
    },
    /// List workload clusters in the current scope
    Clusters {
        /// Narrow the search scope to one name
        name: Option<String>,
    },
    /// List cluster groups
    ClusterGroups,
    /// List workspaces
    Workspaces,
    /// List namespaces of a cluster
    Namespaces {
        /// Parent cluster name
        cluster: String,
    },
    /// List management cluster registrations
    ManagementClusters {
        /// Narrow the search scope to one name
        name: Option<String>,
    },
    /// List inspection scans of a cluster
    Inspections {
        /// Parent cluster name
        cluster: String,
        /// Narrow the search scope to one scan name
        name: Option<String>,
    },
    /// Show an AKS cluster together with its nodepools
    AksCluster {
        /// Cluster name
        name: String,
        #[arg(long)]
        credential: String,
        #[arg(long)]
        subscription: String,
        #[arg(long)]
        resource_group: String,
    },
    /// Print the schema of one resource, or list every known resource
    Schema {
        /// Resource name, e.g. tanzu-mission-control_provisioner
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn get_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tmc-provider")
        .join("tmc-provider.log")
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();

    Some(guard)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_schema(name: Option<&str>) -> Result<()> {
    match name {
        None => {
            for descriptor in resource::registry() {
                println!("{:<55} {}", descriptor.name, descriptor.kind.as_str());
            }
        }
        Some(name) => {
            let entries = resource::lookup(name);
            if entries.is_empty() {
                anyhow::bail!("unknown resource: {name}");
            }
            for descriptor in entries {
                println!("{} ({})", descriptor.name, descriptor.kind.as_str());
                for (field, schema) in (descriptor.schema)() {
                    let mode = if schema.computed {
                        "computed"
                    } else if schema.required {
                        "required"
                    } else {
                        "optional"
                    };
                    let force_new = if schema.force_new { ", force-new" } else { "" };
                    println!(
                        "  {:<28} {:<10} {}{}  {}",
                        field,
                        schema.field_type.as_str(),
                        mode,
                        force_new,
                        schema.description
                    );
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = setup_logging(args.log_level);

    // Schema inspection needs no credentials.
    if let Command::Schema { name } = &args.command {
        return print_schema(name.as_deref());
    }

    let mut config = Config::load();
    let management_cluster =
        config.effective_management_cluster(args.management_cluster.as_deref());
    let provisioner = config.effective_provisioner(args.provisioner.as_deref());

    // Remember explicitly selected scope for the next invocation.
    if let Some(name) = args.management_cluster.as_deref() {
        if let Err(err) = config.set_management_cluster(name) {
            tracing::warn!("failed to persist management cluster selection: {err}");
        }
    }
    if let Some(name) = args.provisioner.as_deref() {
        if let Err(err) = config.set_provisioner(name) {
            tracing::warn!("failed to persist provisioner selection: {err}");
        }
    }

    let credentials = Credentials::from_env()?;
    let csp = CspCredentials::new(&credentials.cloud_endpoint, &credentials.api_token)
        .context("failed to initialize CSP credentials")?;
    let client = TmcClient::new(&credentials.endpoint, csp)
        .context("failed to initialize TMC client")?;

    match args.command {
        Command::Provisioners { name } => {
            let full_name = ProvisionerFullName {
                management_cluster_name: management_cluster,
                name: name.unwrap_or_default(),
                ..Default::default()
            };
            print_json(&client.provisioners().list(&full_name).await?)
        }
        Command::Clusters { name } => {
            let full_name = ClusterFullName {
                management_cluster_name: management_cluster,
                provisioner_name: provisioner,
                name: name.unwrap_or_default(),
            };
            print_json(&client.clusters().list(&full_name).await?)
        }
        Command::ClusterGroups => print_json(&client.cluster_groups().list().await?),
        Command::Workspaces => print_json(&client.workspaces().list().await?),
        Command::Namespaces { cluster } => {
            let full_name = NamespaceFullName {
                management_cluster_name: management_cluster,
                provisioner_name: provisioner,
                cluster_name: cluster,
                ..Default::default()
            };
            print_json(&client.namespaces().list(&full_name).await?)
        }
        Command::ManagementClusters { name } => {
            let full_name = ManagementClusterFullName {
                name: name.unwrap_or_default(),
            };
            print_json(&client.management_clusters().list(&full_name).await?)
        }
        Command::Inspections { cluster, name } => {
            let full_name = InspectionScanFullName {
                management_cluster_name: management_cluster,
                provisioner_name: provisioner,
                cluster_name: cluster,
                name: name.unwrap_or_default(),
            };
            print_json(&client.inspections().list(&full_name).await?)
        }
        Command::AksCluster {
            name,
            credential,
            subscription,
            resource_group,
        } => {
            let full_name = AksClusterFullName {
                credential_name: credential,
                subscription_id: subscription,
                resource_group_name: resource_group,
                name,
            };
            let service = client.aks_clusters();
            let (cluster, nodepools) = futures::try_join!(
                service.get(&full_name),
                service.list_nodepools(&full_name)
            )?;
            print_json(&to_cluster_map(
                Some(&cluster.aks_cluster),
                &nodepools.nodepools,
            ))
        }
        Command::Schema { .. } => unreachable!("handled above"),
    }
}
