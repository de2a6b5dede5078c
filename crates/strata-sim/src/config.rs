use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strata_core::constants::{
    CACHE_MAX_Y, CACHE_MIN_Y, DEFAULT_EDGE_MARGIN, DEFAULT_MINE_LENGTH, DEFAULT_START_MARGIN,
};

use crate::error::SimError;
use crate::strategy::Strategy;

/// Survey parameters. Every field may be left out of a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurveyConfig {
    /// Lowest shaft height surveyed.
    pub min_depth: i32,
    /// Highest shaft height surveyed (inclusive).
    pub max_depth: i32,
    /// Random starts per depth.
    pub iterations: usize,
    /// Voxels dug per shaft.
    pub mine_length: i32,
    /// Shafts per branch-mining layout.
    pub branches: u32,
    pub min_branch_offset: i32,
    pub max_branch_offset: i32,
    /// Distance kept between starts and the map edge.
    pub start_margin: i32,
    /// Fixed generator seed. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Vertical range stored in the block cache.
    pub cache_min_y: i32,
    pub cache_max_y: i32,
    /// Chunk columns trimmed from the ragged Z edges of the world.
    pub edge_margin: i32,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            min_depth: 9,
            max_depth: 13,
            iterations: 10,
            mine_length: DEFAULT_MINE_LENGTH,
            branches: 4,
            min_branch_offset: 2,
            max_branch_offset: 7,
            start_margin: DEFAULT_START_MARGIN,
            seed: None,
            cache_min_y: CACHE_MIN_Y,
            cache_max_y: CACHE_MAX_Y,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl SurveyConfig {
    pub fn depths(&self) -> RangeInclusive<i32> {
        self.min_depth..=self.max_depth
    }

    pub fn branch_offsets(&self) -> RangeInclusive<i32> {
        self.min_branch_offset..=self.max_branch_offset
    }

    /// Strategies evaluated at every depth, in report column order.
    pub fn strategies(&self) -> Vec<Strategy> {
        std::iter::once(Strategy::single())
            .chain(
                self.branch_offsets()
                    .map(|offset| Strategy::branch(offset, self.branches)),
            )
            .collect()
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        if self.depths().is_empty() {
            return invalid(format!(
                "depth range {}..={} is empty",
                self.min_depth, self.max_depth
            ));
        }
        if self.cache_min_y > self.cache_max_y {
            return invalid(format!(
                "cache range {}..={} is empty",
                self.cache_min_y, self.cache_max_y
            ));
        }
        if self.min_depth < self.cache_min_y || self.max_depth > self.cache_max_y {
            return invalid(format!(
                "depths {}..={} fall outside the cached range {}..={}",
                self.min_depth, self.max_depth, self.cache_min_y, self.cache_max_y
            ));
        }
        if self.branch_offsets().is_empty() || self.min_branch_offset < 1 {
            return invalid(format!(
                "branch offsets {}..={} must be a non-empty positive range",
                self.min_branch_offset, self.max_branch_offset
            ));
        }
        if self.iterations == 0 {
            return invalid("iterations must be at least 1".to_string());
        }
        if self.branches == 0 {
            return invalid("branches must be at least 1".to_string());
        }
        if self.mine_length <= 0 {
            return invalid(format!("mine length {} must be positive", self.mine_length));
        }
        if self.start_margin < 0 || self.edge_margin < 0 {
            return invalid("margins must not be negative".to_string());
        }
        Ok(())
    }
}
