use std::path::Path;

use config::{Config, Environment, File, FileFormat, Source};
use serde::Deserialize;

use crate::error::AppError;

/// Default file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "folio";

/// Server settings.
///
/// Resolved from built-in defaults, then an optional TOML file, then
/// `FOLIO_*` environment variables (e.g. `FOLIO_BIND_ADDR`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Directory served for any path the API does not handle.
    pub site_root: String,
    /// Fill empty repositories with the bundled catalog at startup.
    pub seed_demo: bool,
    pub allow_cors: bool,
    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl ServerConfig {
    /// Load settings, reading `path` if given (it must exist) or
    /// `folio.toml` if present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::from_sources(vec![
            Box::new(file),
            Box::new(Environment::with_prefix("FOLIO").try_parsing(true)),
        ])
    }

    /// Load from inline TOML layered over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self, AppError> {
        Self::from_sources(vec![Box::new(File::from_str(toml, FileFormat::Toml))])
    }

    fn from_sources(sources: Vec<Box<dyn Source + Send + Sync>>) -> Result<Self, AppError> {
        Config::builder()
            .set_default("bind_addr", "127.0.0.1:3000")
            .and_then(|b| b.set_default("site_root", "public"))
            .and_then(|b| b.set_default("seed_demo", true))
            .and_then(|b| b.set_default("allow_cors", false))
            .map_err(|e| AppError::Config(e.to_string()))?
            .add_source(sources)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
