use glam::{IVec2, IVec3};
use serde::{Deserialize, Serialize};

use crate::constants::SECTION_SIZE;

/// Newtype for block identifiers. 0 = air/empty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// World coordinate in voxel-space.
pub type WorldCoord = IVec3;

/// Horizontal coordinate in column-space (`x` = X, `y` = Z). Used for chunk
/// columns and region indices.
pub type ColumnCoord = IVec2;

/// Axis-aligned rectangle on the horizontal plane, inclusive on both ends.
///
/// `z1`/`z2` name the second axis because the plane is X/Z in world terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub z1: i32,
    pub x2: i32,
    pub z2: i32,
}

impl Rect {
    pub fn new(x1: i32, z1: i32, x2: i32, z2: i32) -> Self {
        Self { x1, z1, x2, z2 }
    }

    /// Number of cells along X (0 when empty).
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1 + 1).max(0)
    }

    /// Number of cells along Z (0 when empty).
    pub fn depth(&self) -> i32 {
        (self.z2 - self.z1 + 1).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.depth() == 0
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.z1 && point.y <= self.z2
    }

    /// Convert a rectangle of chunk columns to the voxel rectangle it covers.
    /// The last column contributes all 16 of its voxels.
    pub fn to_voxels(&self) -> Rect {
        Rect {
            x1: self.x1 * SECTION_SIZE,
            z1: self.z1 * SECTION_SIZE,
            x2: (self.x2 + 1) * SECTION_SIZE - 1,
            z2: (self.z2 + 1) * SECTION_SIZE - 1,
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}x{}", self.x1, self.z1, self.x2, self.z2)
    }
}
