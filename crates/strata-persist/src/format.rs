/// Magic bytes identifying a voxel cache file.
pub const MAGIC: [u8; 4] = *b"STRM";

/// Current cache format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 48;

/// Cache file header. Fixed 48 bytes, repr(C) for byte-level serialization.
///
/// Followed by `body_len` bytes of LZ4 data that expand to `raw_len` block IDs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CacheHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub _pad0: u16,
    pub offset_x: i32,
    pub offset_z: i32,
    pub size_x: u32,
    pub size_z: u32,
    pub min_y: i32,
    pub max_y: i32,
    pub raw_len: u64,
    pub body_len: u64,
}
