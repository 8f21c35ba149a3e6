//! CLI Tooling
//!
//! Command-line interface over the record store: serve the HTTP API, inspect
//! the tree, import photos and adjust statuses.

use crate::api::PhotoApi;
use crate::config::{AdminConfig, ConfigLoader};
use crate::error::ApiError;
use crate::http::{self, AppState};
use crate::import::import_directory;
use crate::logging::LoggingConfig;
use crate::store::{RecordStore, SledRecordStore, StatusUpdate};
use crate::tooling::format::{
    format_file_text, format_import_text, format_listing_text, format_stats_text,
    format_status_update_text, format_tree_text,
};
use crate::types::Status;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// PhotoAdmin CLI - review photo classification records as a directory tree
#[derive(Parser)]
#[command(name = "photoadmin")]
#[command(about = "Review photo classification records as a directory tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for a local photoadmin.toml
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the configured logging section
    pub fn logging_config(&self, configured: &LoggingConfig) -> LoggingConfig {
        let mut config = configured.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the whole photo tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Directory levels to expand (text only)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// List one directory
    Ls {
        /// Directory path; the tree root when omitted
        path: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one file entry
    Info {
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show rolled-up statistics
    Stats {
        /// Limit to this directory
        #[arg(long)]
        path: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Register new photos from a directory for review
    Import {
        /// Directory to scan (overrides import.photo_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Report what would be imported without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Set the status of one photo
    SetStatus { path: String, status: String },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context holding the loaded configuration and the opened store
pub struct CliContext {
    config: AdminConfig,
    api: PhotoApi,
}

impl CliContext {
    /// Load configuration and open the configured record store
    pub fn new(workdir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(&workdir, config_path.as_deref())?;
        Self::from_config(config)
    }

    /// Open the record store named by an already loaded configuration
    pub fn from_config(config: AdminConfig) -> Result<Self, ApiError> {
        let store_path = config.storage.resolve_store_path()?;
        let store = SledRecordStore::open(&store_path, &config.storage.table)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn load_config(workdir: &Path, config_path: Option<&Path>) -> Result<AdminConfig, ApiError> {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(workdir),
        }
    }

    pub fn with_store(config: AdminConfig, store: Arc<dyn RecordStore>) -> Self {
        let api = PhotoApi::new(store, &config.tree);
        Self { config, api }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn api(&self) -> &PhotoApi {
        &self.api
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Serve { host, port } => self.handle_serve(host.clone(), *port),
            Commands::Tree { format, depth } => {
                let tree = self.api.build_tree()?;
                match parse_format(format)? {
                    OutputFormat::Json => render_json(tree.root()),
                    OutputFormat::Text => Ok(format_tree_text(tree.root(), *depth, tree.report())),
                }
            }
            Commands::Ls { path, format } => {
                let path = path.clone().unwrap_or_default();
                let listing = self.api.directory_listing(&path)?;
                match parse_format(format)? {
                    OutputFormat::Json => render_json(&listing),
                    OutputFormat::Text => Ok(format_listing_text(&path, &listing)),
                }
            }
            Commands::Info { path, format } => {
                let entry = self.api.file_info(path)?;
                match parse_format(format)? {
                    OutputFormat::Json => render_json(&entry),
                    OutputFormat::Text => Ok(format_file_text(&entry)),
                }
            }
            Commands::Stats { path, format } => {
                let tree = self.api.build_tree()?;
                let scope = path.as_deref().filter(|p| !p.is_empty());
                let stats = tree
                    .statistics(scope)
                    .ok_or_else(|| ApiError::PathNotInTree(scope.unwrap_or_default().to_string()))?;
                match parse_format(format)? {
                    OutputFormat::Json => render_json(&json!({
                        "stats": stats,
                        "build": tree.report(),
                    })),
                    OutputFormat::Text => Ok(format_stats_text(
                        scope.unwrap_or_default(),
                        &stats,
                        Some(tree.report()),
                    )),
                }
            }
            Commands::Import { dir, dry_run } => {
                let dir = dir
                    .clone()
                    .or_else(|| self.config.import.photo_dir.clone())
                    .ok_or_else(|| {
                        ApiError::InvalidRequest(
                            "No import directory: pass --dir or set import.photo_dir".to_string(),
                        )
                    })?;
                let report = import_directory(
                    self.api.store().as_ref(),
                    &dir,
                    &self.config.import.extensions,
                    *dry_run,
                )?;
                Ok(format_import_text(&dir.display().to_string(), &report, *dry_run))
            }
            Commands::SetStatus { path, status } => {
                if path.trim().is_empty() {
                    return Err(ApiError::InvalidRequest("path must not be empty".to_string()));
                }
                let status = Status::from(status.as_str());
                let store = self.api.store();
                let report = store.apply_status_updates(&[StatusUpdate {
                    path: path.clone(),
                    status: status.clone(),
                }])?;
                store.flush()?;
                Ok(format_status_update_text(path, &status, &report))
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    fn handle_serve(&self, host: Option<String>, port: Option<u16>) -> Result<String, ApiError> {
        let mut server = self.config.server.clone();
        if let Some(host) = host {
            server.host = host;
        }
        if let Some(port) = port {
            server.port = port;
        }

        let state = AppState::from_config(self.api.clone(), &self.config)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start runtime: {}", e)))?;

        info!(host = %server.host, port = server.port, "Starting server");
        runtime.block_on(http::serve(state, &server))?;
        Ok("Server stopped".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::InvalidRequest(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidRequest(format!("Failed to render JSON: {}", e)))
}
