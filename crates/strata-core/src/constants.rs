//! Single source of truth for shared constants.
//! Values describe the on-disk world layout and the survey defaults.

/// Side length of a chunk section in voxels (sections are cubes).
pub const SECTION_SIZE: i32 = 16;

/// Voxels in one horizontal layer of a section (16 x 16).
pub const SECTION_LAYER: usize = (SECTION_SIZE * SECTION_SIZE) as usize;

/// Voxels (and block-ID bytes) per section (16^3).
pub const BLOCKS_PER_SECTION: usize = SECTION_LAYER * SECTION_SIZE as usize;

/// Side length of a region file in chunk columns.
pub const REGION_CHUNKS: i32 = 32;

/// Number of chunk slots in a region file (32 x 32).
pub const REGION_SLOTS: usize = (REGION_CHUNKS * REGION_CHUNKS) as usize;

/// Region sector length in bytes.
pub const REGION_SECTOR_BYTES: usize = 4096;

/// Columns trimmed from each Z edge of the populated area before the gap scan.
pub const DEFAULT_EDGE_MARGIN: i32 = 5;

/// Lowest Y at which diamond ore generates.
pub const ORE_MIN_Y: i32 = 0;

/// Highest Y at which diamond ore generates.
pub const ORE_MAX_Y: i32 = 15;

/// Bottom of the cached vertical range.
pub const CACHE_MIN_Y: i32 = ORE_MIN_Y;

/// Top of the cached vertical range. Headroom above the ore band leaves room
/// for shafts that climb after a find.
pub const CACHE_MAX_Y: i32 = ORE_MAX_Y + 10;

/// Default voxel margin kept between sampled shaft starts and the map edge.
pub const DEFAULT_START_MARGIN: i32 = 50;

/// Default shaft length in voxels.
pub const DEFAULT_MINE_LENGTH: i32 = 1000;
