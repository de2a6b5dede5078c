pub mod config;
pub mod error;
pub mod report;
pub mod run;

pub use error::CliError;
pub use run::{build_cache, run, RunOptions};
