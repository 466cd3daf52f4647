//! Stowage CLI: binds data sources to storage backends in a registry file.
//!
//! Settings come from STOWAGE_* environment variables (see `StowageConfig`);
//! `--registry` overrides STOWAGE_REGISTRY_PATH.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use stowage_cli::{commands, init_tracing, truncate_string};
use stowage_core::{
    index_table_names, AppError, ErrorMetadata, LogLevel, StorageType, StowageConfig,
};
use stowage_registry::{JsonFileConfigStore, Registry};
use stowage_storage::{validate_location, CredentialPolicy, DataSource};

#[derive(Parser)]
#[command(
    name = "stowage",
    about = "Data source and storage backend administration"
)]
struct Cli {
    /// Registry file (defaults to STOWAGE_REGISTRY_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a folder can hold a local data source
    Validate {
        /// Absolute folder path
        folder: String,
    },
    /// Create or update a data source and bind it to a backend
    Bind {
        /// Data source name
        #[arg(long)]
        name: String,
        /// Storage type: local or gateway
        #[arg(long = "type", default_value = "local")]
        storage_type: StorageType,
        /// Folder of a local data source
        #[arg(long)]
        folder: Option<String>,
        /// Endpoint of a gateway data source
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        api_secret: Option<String>,
        /// Port the backend listens on
        #[arg(long, default_value = "0")]
        port: u16,
        /// Address of the node hosting a local data source
        #[arg(long, default_value = "")]
        peer: String,
    },
    /// List data sources and backends
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove a data source (its backend is kept until pruned)
    Remove {
        /// Data source name
        name: String,
    },
    /// Print one backend no data source uses
    Orphans,
    /// Remove every backend no data source uses
    Prune,
    /// Print the index table names of a data source
    Tables {
        /// Data source name
        name: String,
    },
}

#[derive(Serialize)]
struct Listing<'a> {
    data_sources: Vec<&'a DataSource>,
    backends: Vec<&'a stowage_core::StorageBackend>,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.log_level() {
                LogLevel::Debug => tracing::debug!(error = %e.detailed_message(), "Command failed"),
                LogLevel::Warn => tracing::warn!(error = %e.detailed_message(), "Command failed"),
                LogLevel::Error => tracing::error!(error = %e.detailed_message(), "Command failed"),
            }
            eprintln!("error [{}]: {}", e.error_code(), e.client_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("hint: {}", action);
            }
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = StowageConfig::from_env()
        .context("Failed to load configuration")
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    if let Some(path) = cli.registry {
        config.registry_path = path;
    }

    let store = JsonFileConfigStore::new(&config.registry_path);
    let registry = Registry::with_prefix(store, config.namespace_prefix.clone());
    tracing::debug!(registry = %config.registry_path.display(), "Registry opened");

    match cli.command {
        Commands::Validate { folder } => {
            validate_location(&folder)?;
            println!("{} can hold a local data source", folder);
        }
        Commands::Bind {
            name,
            storage_type,
            folder,
            endpoint,
            api_key,
            api_secret,
            port,
            peer,
        } => {
            let mut source = match (storage_type, folder, endpoint) {
                (StorageType::Local, Some(folder), _) => DataSource::local(name, folder, peer),
                (StorageType::ObjectGateway, _, Some(endpoint)) => {
                    DataSource::gateway(name, endpoint, "", "")
                }
                (StorageType::Local, None, _) => {
                    return Err(AppError::InvalidInput(
                        "--folder is required for local data sources".to_string(),
                    ))
                }
                (StorageType::ObjectGateway, _, None) => {
                    return Err(AppError::InvalidInput(
                        "--endpoint is required for gateway data sources".to_string(),
                    ))
                }
            };
            source.api_key = api_key.unwrap_or_default();
            source.api_secret = api_secret.unwrap_or_default();
            source.objects_port = port;

            let binding = commands::bind(&registry, source, &CredentialPolicy::from(&config))?;
            println!(
                "{} -> {} ({})",
                binding.source.name,
                binding.backend.name,
                if binding.created { "created" } else { "reused" }
            );
        }
        Commands::List { json } => {
            let snapshot = registry.snapshot();
            if json {
                let listing = Listing {
                    data_sources: snapshot.data_sources.values().collect(),
                    backends: snapshot.backends.values().collect(),
                };
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                println!(
                    "{:<24} {:<16} {:<12} {:<32}",
                    "DATA SOURCE", "TYPE", "BACKEND", "LOCATION"
                );
                for source in snapshot.data_sources.values() {
                    let location = match source.storage_type {
                        StorageType::Local => source.folder(),
                        StorageType::ObjectGateway => source.custom_endpoint(),
                    };
                    println!(
                        "{:<24} {:<16} {:<12} {:<32}",
                        truncate_string(&source.name, 24),
                        source.storage_type.to_string(),
                        truncate_string(&source.objects_service_name, 12),
                        truncate_string(location, 32)
                    );
                }
                println!();
                println!(
                    "{:<12} {:<16} {:<16} {:<32}",
                    "BACKEND", "TYPE", "PEER", "ROOT / ENDPOINT"
                );
                for backend in snapshot.backends.values() {
                    let location = match backend.storage_type {
                        StorageType::Local => &backend.local_folder,
                        StorageType::ObjectGateway => &backend.endpoint_url,
                    };
                    println!(
                        "{:<12} {:<16} {:<16} {:<32}",
                        truncate_string(&backend.name, 12),
                        backend.storage_type.to_string(),
                        truncate_string(&backend.peer_address, 16),
                        truncate_string(location, 32)
                    );
                }
            }
        }
        Commands::Remove { name } => {
            commands::remove(&registry, &name)?;
            println!("{} removed", name);
        }
        Commands::Orphans => match commands::orphan(&registry)? {
            Some(name) => println!("{}", name),
            None => println!("No unused backend"),
        },
        Commands::Prune => {
            let removed = commands::prune(&registry)?;
            if removed.is_empty() {
                println!("No unused backend");
            }
            for name in removed {
                println!("{} removed", name);
            }
        }
        Commands::Tables { name } => {
            let tables = index_table_names(&name);
            println!("commits {}", tables.commits);
            println!("nodes   {}", tables.nodes);
            println!("tree    {}", tables.tree);
        }
    }

    Ok(())
}
