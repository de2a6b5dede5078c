pub mod block_map;
pub mod bounds;
pub mod chunk;
pub mod error;
pub mod loader;
pub mod nbt;
pub mod region;

#[cfg(test)]
pub(crate) mod test_util;

pub use block_map::BlockMap;
pub use bounds::{find_bounding_box, populated_columns};
pub use chunk::{assemble_chunk, read_region_sections, ChunkSection, SectionCollector};
pub use error::{BlockMapError, ChunkError, NbtError, RegionError, WorldError};
pub use loader::{load_region_file, load_world};
pub use nbt::{TagKind, TagVisitor, Traversal, Value, Visit};
pub use region::{parse_region_name, Compression, RegionFile};
