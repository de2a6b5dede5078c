use glam::IVec3;
use strata_core::constants::SECTION_SIZE;
use strata_core::math::section_index;
use strata_core::types::{BlockId, Rect, WorldCoord};

use crate::chunk::ChunkSection;
use crate::error::BlockMapError;

/// Dense voxel cache over a horizontal rectangle and an inclusive Y range.
///
/// Storage holds one block-ID byte per voxel, x fastest, then z, then y.
/// Every lookup is defined: coordinates outside the map read as air.
/// `Clone` copies the whole storage, so a clone can be dug through freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMap {
    /// World coordinate of storage voxel (0, 0, 0). `offset.y` is the min Y.
    offset: WorldCoord,
    size_x: i32,
    size_z: i32,
    height: i32,
    blocks: Vec<u8>,
}

impl BlockMap {
    /// An all-air map covering `bounds` (voxel units) and `min_y..=max_y`.
    pub fn new(bounds: Rect, min_y: i32, max_y: i32) -> Result<Self, BlockMapError> {
        let volume = checked_volume(bounds.width(), bounds.depth(), min_y, max_y)?;
        Ok(Self {
            offset: IVec3::new(bounds.x1, min_y, bounds.z1),
            size_x: bounds.width(),
            size_z: bounds.depth(),
            height: max_y - min_y + 1,
            blocks: vec![BlockId::AIR.0; volume],
        })
    }

    /// Build the map from decoded sections. Voxels no section covers stay air;
    /// parts of sections outside the map are dropped.
    pub fn build(
        sections: &[ChunkSection],
        bounds: Rect,
        min_y: i32,
        max_y: i32,
    ) -> Result<Self, BlockMapError> {
        let mut map = Self::new(bounds, min_y, max_y)?;
        for section in sections {
            map.write_section(section);
        }
        Ok(map)
    }

    /// Reassemble a map from its persisted parts.
    pub fn from_raw(
        offset_x: i32,
        offset_z: i32,
        size_x: i32,
        size_z: i32,
        min_y: i32,
        max_y: i32,
        blocks: Vec<u8>,
    ) -> Result<Self, BlockMapError> {
        let expected = checked_volume(size_x, size_z, min_y, max_y)?;
        if blocks.len() != expected {
            return Err(BlockMapError::SizeMismatch {
                expected,
                actual: blocks.len(),
            });
        }
        Ok(Self {
            offset: IVec3::new(offset_x, min_y, offset_z),
            size_x,
            size_z,
            height: max_y - min_y + 1,
            blocks,
        })
    }

    fn write_section(&mut self, section: &ChunkSection) {
        let origin = section.position;
        let x_start = origin.x.max(self.offset.x);
        let x_end = (origin.x + SECTION_SIZE).min(self.offset.x + self.size_x);
        if x_start >= x_end {
            return;
        }
        let run = (x_end - x_start) as usize;

        for ly in 0..SECTION_SIZE {
            for lz in 0..SECTION_SIZE {
                let row = IVec3::new(x_start, origin.y + ly, origin.z + lz);
                let Some(dst) = self.index(row) else {
                    continue;
                };
                let src = section_index(IVec3::new(x_start - origin.x, ly, lz));
                self.blocks[dst..dst + run].copy_from_slice(&section.blocks()[src..src + run]);
            }
        }
    }

    fn index(&self, pos: WorldCoord) -> Option<usize> {
        let local = pos - self.offset;
        let inside = (0..self.size_x).contains(&local.x)
            && (0..self.height).contains(&local.y)
            && (0..self.size_z).contains(&local.z);
        inside.then(|| {
            (local.y as usize * self.size_z as usize + local.z as usize) * self.size_x as usize
                + local.x as usize
        })
    }

    /// Block at `pos`; air outside the map.
    pub fn get(&self, pos: WorldCoord) -> BlockId {
        self.index(pos)
            .map_or(BlockId::AIR, |index| BlockId(self.blocks[index]))
    }

    /// Overwrite the block at `pos`. Returns `false` (and does nothing) outside the map.
    pub fn set(&mut self, pos: WorldCoord, id: BlockId) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.blocks[index] = id.0;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, pos: WorldCoord) -> bool {
        self.index(pos).is_some()
    }

    pub fn offset(&self) -> WorldCoord {
        self.offset
    }

    pub fn size_x(&self) -> i32 {
        self.size_x
    }

    pub fn size_z(&self) -> i32 {
        self.size_z
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn min_y(&self) -> i32 {
        self.offset.y
    }

    pub fn max_y(&self) -> i32 {
        self.offset.y + self.height - 1
    }

    /// Horizontal extent in voxel units.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.z,
            self.offset.x + self.size_x - 1,
            self.offset.z + self.size_z - 1,
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.blocks
    }
}

fn checked_volume(size_x: i32, size_z: i32, min_y: i32, max_y: i32) -> Result<usize, BlockMapError> {
    if size_x <= 0 || size_z <= 0 {
        return Err(BlockMapError::InvalidDimensions(format!(
            "horizontal size {size_x}x{size_z}"
        )));
    }
    if min_y > max_y {
        return Err(BlockMapError::InvalidDimensions(format!(
            "vertical range {min_y}..={max_y}"
        )));
    }
    let height = (max_y as i64 - min_y as i64 + 1) as usize;
    (size_x as usize)
        .checked_mul(size_z as usize)
        .and_then(|area| area.checked_mul(height))
        .ok_or_else(|| {
            BlockMapError::InvalidDimensions(format!("{size_x}x{height}x{size_z} overflows"))
        })
}
