pub mod service;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use service::ServiceConfig;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "resume-api")]
#[command(about = "Read-only resume API backed by Supabase")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, help = "TOML config file; environment variables are used when absent")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Resolves upstream settings and bind address. A `--config` file wins
    /// over the environment; `[server]` values in it win over the CLI defaults.
    pub fn resolve(&self) -> Result<(ServiceConfig, String)> {
        let (service, host, port) = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                let service = file.service_config()?;
                let host = file.host().unwrap_or(&self.host).to_string();
                let port = file.port().unwrap_or(self.port);
                (service, host, port)
            }
            None => (ServiceConfig::from_env()?, self.host.clone(), self.port),
        };

        service.validate()?;
        Ok((service, format!("{}:{}", host, port)))
    }
}
