use std::path::PathBuf;

use strata_persist::PersistError;
use strata_sim::SimError;
use strata_world::{BlockMapError, WorldError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to load world: {0}")]
    World(#[from] WorldError),
    #[error("No gap-free area found in {0}")]
    NoBoundingBox(PathBuf),
    #[error("Failed to build block map: {0}")]
    BlockMap(#[from] BlockMapError),
    #[error("Cache {path} covers y {cache_min}..={cache_max}, survey needs {min_depth}..={max_depth}; rerun with --rebuild")]
    CacheRange {
        path: PathBuf,
        cache_min: i32,
        cache_max: i32,
        min_depth: i32,
        max_depth: i32,
    },
    #[error("Block cache error: {0}")]
    Persist(#[from] PersistError),
    #[error("Survey failed: {0}")]
    Sim(#[from] SimError),
    #[error("Failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
}
