use crate::constants::{REGION_CHUNKS, SECTION_LAYER, SECTION_SIZE};
use crate::types::{ColumnCoord, WorldCoord};
use glam::{IVec2, IVec3};

/// Convert a world-space voxel coordinate to its containing chunk column.
pub fn world_to_column(world: WorldCoord) -> ColumnCoord {
    IVec2::new(
        world.x.div_euclid(SECTION_SIZE),
        world.z.div_euclid(SECTION_SIZE),
    )
}

/// Minimum-corner world coordinate of a section, from its region index,
/// its slot inside the region and its vertical section index.
pub fn section_origin(region: ColumnCoord, slot: IVec2, section_y: i32) -> WorldCoord {
    let column = region * REGION_CHUNKS + slot;
    IVec3::new(
        column.x * SECTION_SIZE,
        section_y * SECTION_SIZE,
        column.y * SECTION_SIZE,
    )
}

/// Index of a local voxel inside a section's block array (x fastest, then z, then y).
pub fn section_index(local: IVec3) -> usize {
    local.y as usize * SECTION_LAYER + local.z as usize * SECTION_SIZE as usize + local.x as usize
}
