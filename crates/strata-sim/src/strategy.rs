use glam::IVec3;
use strata_core::types::WorldCoord;
use strata_world::BlockMap;

use crate::counter::EncounterCounter;
use crate::miner::Miner;

/// Every shaft heads along +Z.
pub const HEADING: IVec3 = IVec3::Z;

/// A branch-mining layout: `branches` parallel shafts spaced `branch_offset`
/// voxels apart along +X.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub name: String,
    pub branch_offset: i32,
    pub branches: u32,
}

impl Strategy {
    /// One lone shaft.
    pub fn single() -> Self {
        Self {
            name: "Single branch".to_string(),
            branch_offset: 0,
            branches: 1,
        }
    }

    pub fn branch(branch_offset: i32, branches: u32) -> Self {
        Self {
            name: format!("Strategy x+{branch_offset}"),
            branch_offset,
            branches,
        }
    }

    /// Start of shaft `index` for a layout anchored at `start`.
    pub fn shaft_start(&self, start: WorldCoord, index: u32) -> WorldCoord {
        start + IVec3::new(index as i32 * self.branch_offset, 0, 0)
    }
}

/// Average encounters per start for `strategy`.
///
/// Each start digs its shafts through a fresh clone of `map`, so samples never
/// see each other's tunnels. An empty `starts` slice yields an empty counter.
pub fn run_strategy(
    map: &BlockMap,
    mine_length: i32,
    starts: &[WorldCoord],
    strategy: &Strategy,
) -> EncounterCounter {
    let mut total = EncounterCounter::new();

    for &start in starts {
        let mut miner = Miner::new(map.clone());
        for index in 0..strategy.branches {
            miner.run(strategy.shaft_start(start, index), HEADING, mine_length);
        }
        total.add_all(miner.mined());
    }

    total.average(starts.len());
    total
}
