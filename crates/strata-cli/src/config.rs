use std::path::{Path, PathBuf};

use strata_sim::SurveyConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config RON: {0}")]
    ParseError(String),
}

/// Parse a survey config from a RON string. Missing fields take defaults.
pub fn parse_config(ron_str: &str) -> Result<SurveyConfig, ConfigError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Read and parse a survey config file.
pub fn load_config(path: &Path) -> Result<SurveyConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)?;
    log::info!("Loaded survey config from {}", path.display());
    Ok(config)
}
