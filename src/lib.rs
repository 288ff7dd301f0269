pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{ServiceConfig, TomlConfig};
pub use crate::core::{projection::FieldProjection, source::SupabaseSource};
pub use domain::model::{Record, ResumeField};
pub use server::{create_router, AppState};
pub use utils::error::{ResumeError, Result};
