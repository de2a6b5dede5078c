pub mod config;
pub mod counter;
pub mod error;
pub mod miner;
pub mod rng;
pub mod strategy;
pub mod survey;

#[cfg(test)]
mod test_harness;

pub use config::SurveyConfig;
pub use counter::EncounterCounter;
pub use error::SimError;
pub use miner::Miner;
pub use rng::{sample_starts, survey_rng};
pub use strategy::{run_strategy, Strategy};
pub use survey::{run_survey, DepthResult, StrategyResult, SurveyResults, Table};
