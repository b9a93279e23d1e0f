//! Environment-driven server configuration.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_DATA_FILE: &str = "data/symptoms.tsv";
const DEFAULT_PORT: u16 = 8000;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TSV association table the corpus is built from (`TRIAGE_DATA`).
    pub data_file: PathBuf,
    /// Directory summaries are written to (`TRIAGE_SUMMARY_DIR`).
    pub summary_dir: PathBuf,
    /// TCP port to listen on (`PORT`).
    pub port: u16,
}

impl ServerConfig {
    /// Read the configuration from environment variables, applying defaults
    /// for anything unset.
    ///
    /// # Errors
    ///
    /// Fails if `PORT` is set but not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let data_file =
            PathBuf::from(env::var("TRIAGE_DATA").unwrap_or_else(|_| DEFAULT_DATA_FILE.into()));
        let summary_dir =
            PathBuf::from(env::var("TRIAGE_SUMMARY_DIR").unwrap_or_else(|_| ".".into()));
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("invalid PORT value '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { data_file, summary_dir, port })
    }
}
