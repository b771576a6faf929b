//! # Server Configuration
//!
//! Everything the server reads from the environment, gathered once at
//! startup into an immutable `AppConfig`.

use pay_core::PaymentsConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_ROOT: &str = ".";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory static assets are served from
    pub static_root: PathBuf,
    /// Public payment settings
    pub payments: PaymentsConfig,
}

impl AppConfig {
    /// Create a config serving `static_root` with default settings
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_root: static_root.into(),
            payments: PaymentsConfig::default(),
        }
    }

    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            static_root: lookup("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_ROOT)),
            payments: PaymentsConfig::from_vars(&lookup),
        }
    }

    /// Builder: set payment settings
    pub fn with_payments(mut self, payments: PaymentsConfig) -> Self {
        self.payments = payments;
        self
    }

    /// Address string handed to the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL printed in the startup log
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

/// Load key/value pairs from the env file into the process environment.
///
/// Uses `ENV_FILE` when set, `.env` in the working directory otherwise.
/// Variables that are already set are left alone. Returns the file that was
/// loaded, or `None` when there is no such file.
pub fn load_env_file() -> Result<Option<PathBuf>, dotenvy::Error> {
    let path = std::env::var("ENV_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENV_FILE));
    load_env_file_from(&path)
}

fn load_env_file_from(path: &Path) -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
