//! Start-point sampling.
//!
//! Randomness always comes from an explicit `StdRng`; a survey run is fully
//! determined by its seed.

use glam::IVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata_core::types::WorldCoord;
use strata_world::BlockMap;

use crate::error::SimError;

/// Generator for one survey run. Without a configured seed a fresh one is
/// drawn; either way it is logged so the run can be replayed.
pub fn survey_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("Survey seed: {seed}");
    StdRng::seed_from_u64(seed)
}

/// Draw `count` shaft starts at height `y`.
///
/// Starts keep `margin` voxels from every map edge, and on the Z axis also
/// leave `mine_length` voxels ahead so a +Z shaft ends inside the map.
pub fn sample_starts<R: Rng>(
    rng: &mut R,
    map: &BlockMap,
    y: i32,
    count: usize,
    margin: i32,
    mine_length: i32,
) -> Result<Vec<WorldCoord>, SimError> {
    let x_range = free_extent(map.size_x(), margin, 0).ok_or(SimError::MapTooSmall {
        axis: 'x',
        extent: map.size_x(),
        margin,
        mine_length: 0,
    })?;
    let z_range = free_extent(map.size_z(), margin, mine_length).ok_or(SimError::MapTooSmall {
        axis: 'z',
        extent: map.size_z(),
        margin,
        mine_length,
    })?;

    let offset = map.offset();
    Ok((0..count)
        .map(|_| {
            IVec3::new(
                offset.x + margin + rng.gen_range(0..x_range),
                y,
                offset.z + margin + rng.gen_range(0..z_range),
            )
        })
        .collect())
}

/// Positions left on one axis after both margins and the run ahead, if any.
fn free_extent(extent: i32, margin: i32, run: i32) -> Option<i32> {
    margin
        .checked_mul(2)
        .and_then(|margins| extent.checked_sub(margins))
        .and_then(|rest| rest.checked_sub(run))
        .filter(|&free| free > 0)
}
