use glam::IVec3;
use strata_core::types::{BlockId, WorldCoord};
use strata_world::BlockMap;

use crate::counter::EncounterCounter;

/// Digs straight shafts through its own copy of a block map and tallies
/// every voxel it removes.
pub struct Miner {
    map: BlockMap,
    mined: EncounterCounter,
}

impl Miner {
    /// Take ownership of `map`. Pass a clone to keep the original intact.
    pub fn new(map: BlockMap) -> Self {
        Self {
            map,
            mined: EncounterCounter::new(),
        }
    }

    /// Dig `length` voxels: `start + i * heading` for `i` in `0..length`.
    ///
    /// Each voxel is recorded as found (air included, so a shaft crossing an
    /// earlier one counts the dug-out voxels as air) and then cleared.
    /// Positions outside the map read as air and stay that way.
    pub fn run(&mut self, start: WorldCoord, heading: IVec3, length: i32) {
        for i in 0..length.max(0) {
            let pos = start + heading * i;
            self.mined.record(self.map.get(pos));
            self.map.set(pos, BlockId::AIR);
        }
    }

    pub fn mined(&self) -> &EncounterCounter {
        &self.mined
    }

    pub fn map(&self) -> &BlockMap {
        &self.map
    }
}
