use std::collections::BTreeSet;

use rand::Rng;
use strata_core::block::{DIAMOND_ORE, LAVA};
use strata_core::types::BlockId;
use strata_world::BlockMap;

use crate::config::SurveyConfig;
use crate::counter::EncounterCounter;
use crate::error::SimError;
use crate::rng::sample_starts;
use crate::strategy::run_strategy;

/// Averaged encounters of one strategy at one depth.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub strategy: String,
    /// Per shaft, averaged over the sampled starts.
    pub counts: EncounterCounter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepthResult {
    pub depth: i32,
    pub strategies: Vec<StrategyResult>,
}

/// Results of a full survey, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyResults {
    pub depths: Vec<DepthResult>,
}

/// One block type's averages: rows are depths, columns are strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub block: BlockId,
    pub columns: Vec<String>,
    pub rows: Vec<(i32, Vec<f64>)>,
}

impl Table {
    pub fn get(&self, depth: i32, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|(d, _)| *d == depth)
            .map(|(_, values)| values[col])
    }
}

impl SurveyResults {
    /// Strategy names in first-seen order.
    pub fn strategy_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for result in self.depths.iter().flat_map(|d| &d.strategies) {
            if !names.contains(&result.strategy.as_str()) {
                names.push(&result.strategy);
            }
        }
        names
    }

    /// Every block type encountered anywhere in the survey.
    pub fn block_ids(&self) -> BTreeSet<BlockId> {
        self.depths
            .iter()
            .flat_map(|d| &d.strategies)
            .flat_map(|s| s.counts.iter().map(|(id, _)| id))
            .collect()
    }

    /// Pivot the results for one block type. Missing cells read zero.
    pub fn table(&self, block: BlockId) -> Table {
        let columns: Vec<String> = self
            .strategy_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let rows = self
            .depths
            .iter()
            .map(|depth| {
                let values = columns
                    .iter()
                    .map(|column| {
                        depth
                            .strategies
                            .iter()
                            .find(|s| &s.strategy == column)
                            .map_or(0.0, |s| s.counts.get(block))
                    })
                    .collect();
                (depth.depth, values)
            })
            .collect();
        Table {
            block,
            columns,
            rows,
        }
    }

    /// One table per encountered block type, ascending by ID.
    pub fn tables(&self) -> Vec<Table> {
        self.block_ids().into_iter().map(|id| self.table(id)).collect()
    }
}

/// Evaluate every configured strategy at every configured depth.
///
/// Each depth draws its own set of starts; all strategies at that depth share
/// them. Results are per shaft: a layout's totals are divided by its branch
/// count.
pub fn run_survey<R: Rng>(
    map: &BlockMap,
    config: &SurveyConfig,
    rng: &mut R,
) -> Result<SurveyResults, SimError> {
    config.validate()?;
    let strategies = config.strategies();
    let mut results = SurveyResults::default();

    for depth in config.depths() {
        let starts = sample_starts(
            rng,
            map,
            depth,
            config.iterations,
            config.start_margin,
            config.mine_length,
        )?;
        log::debug!("Depth {depth}: {} starts", starts.len());

        let mut depth_result = DepthResult {
            depth,
            strategies: Vec::with_capacity(strategies.len()),
        };
        for strategy in &strategies {
            let mut counts = run_strategy(map, config.mine_length, &starts, strategy);
            counts.average(strategy.branches as usize);

            log::info!(
                "y={depth} {}: diamond_ore {:.1}, lava {:.1}",
                strategy.name,
                counts.get(DIAMOND_ORE),
                counts.get(LAVA)
            );
            depth_result.strategies.push(StrategyResult {
                strategy: strategy.name.clone(),
                counts,
            });
        }
        results.depths.push(depth_result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strata_core::block::STONE;
    use strata_core::types::Rect;

    fn small_config() -> SurveyConfig {
        SurveyConfig {
            min_depth: 2,
            max_depth: 3,
            iterations: 4,
            mine_length: 20,
            branches: 2,
            min_branch_offset: 2,
            max_branch_offset: 3,
            start_margin: 4,
            cache_min_y: 0,
            cache_max_y: 5,
            ..Default::default()
        }
    }

    /// Stone on layer 2, air everywhere else.
    fn layered_map() -> BlockMap {
        let mut map = BlockMap::new(Rect::new(0, 0, 31, 63), 0, 5).expect("valid dimensions");
        for z in 0..64 {
            for x in 0..32 {
                map.set(IVec3::new(x, 2, z), STONE);
            }
        }
        map
    }

    #[test]
    fn test_survey_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let results = run_survey(&layered_map(), &small_config(), &mut rng).expect("survey runs");
        assert_eq!(results.depths.len(), 2);
        assert_eq!(
            results.strategy_names(),
            vec!["Single branch", "Strategy x+2", "Strategy x+3"]
        );
        assert_eq!(
            results.block_ids().into_iter().collect::<Vec<_>>(),
            vec![BlockId::AIR, STONE]
        );
    }

    #[test]
    fn test_results_are_per_shaft() {
        let mut rng = StdRng::seed_from_u64(5);
        let results = run_survey(&layered_map(), &small_config(), &mut rng).expect("survey runs");

        let stone = results.table(STONE);
        // Every shaft at y=2 digs 20 stone, whether alone or one of two.
        for column in ["Single branch", "Strategy x+2", "Strategy x+3"] {
            assert_eq!(stone.get(2, column), Some(20.0), "{column}");
            assert_eq!(stone.get(3, column), Some(0.0), "{column}");
        }
        assert_eq!(results.table(BlockId::AIR).get(3, "Strategy x+3"), Some(20.0));
    }

    #[test]
    fn test_same_seed_same_results() {
        let mut map = layered_map();
        for z in (0..64).step_by(3) {
            map.set(IVec3::new(z % 32, 2, z), DIAMOND_ORE);
        }
        let config = small_config();
        let a = run_survey(&map, &config, &mut StdRng::seed_from_u64(99)).expect("survey runs");
        let b = run_survey(&map, &config, &mut StdRng::seed_from_u64(99)).expect("survey runs");
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SurveyConfig {
            iterations: 0,
            ..small_config()
        };
        let result = run_survey(&layered_map(), &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_map_too_small_propagates() {
        let config = SurveyConfig {
            mine_length: 60,
            ..small_config()
        };
        let result = run_survey(&layered_map(), &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(SimError::MapTooSmall { axis: 'z', .. })));
    }

    #[test]
    fn test_huge_start_margin_is_an_error() {
        let config = SurveyConfig {
            start_margin: i32::MAX / 2 + 1,
            ..small_config()
        };
        config.validate().expect("margin alone is not checked against the map");
        let result = run_survey(&layered_map(), &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(SimError::MapTooSmall { axis: 'x', .. })));
    }
}
