use std::io;
use std::path::PathBuf;

/// Errors raised while decoding a tag-tree (NBT) stream.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("unknown tag type {0}")]
    UnknownTag(u8),

    #[error("stream truncated mid-value")]
    Truncated,

    #[error("negative length {0}")]
    NegativeLength(i32),

    #[error("list of {0} end tags")]
    EndList(i32),

    #[error("tags nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("I/O error while decoding: {0}")]
    Io(io::Error),
}

impl From<io::Error> for NbtError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            NbtError::Truncated
        } else {
            NbtError::Io(err)
        }
    }
}

/// Errors raised while reading a region container.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("region header too small ({0} bytes, minimum {1})")]
    HeaderTooSmall(usize, usize),

    #[error("chunk slot ({0}, {1}) outside the 32x32 region grid")]
    SlotOutOfRange(i32, i32),

    #[error("chunk payload at byte {offset} runs past end of file ({file_len} bytes)")]
    PayloadOutOfBounds { offset: usize, file_len: usize },

    #[error("chunk payload of {length} bytes exceeds its {capacity} allocated bytes")]
    SectorOverflow { length: usize, capacity: usize },

    #[error("unsupported compression type {0}")]
    UnsupportedCompression(u8),

    #[error("decompression failed: {0}")]
    Decompress(io::Error),

    #[error("region file name {0:?} does not match r.<x>.<z>.mca")]
    BadFileName(String),

    #[error(transparent)]
    Nbt(#[from] NbtError),

    #[error("I/O error reading region file: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while turning chunk payloads into sections.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("malformed section in chunk ({x}, {z}): {reason}")]
    MalformedSection { x: i32, z: i32, reason: String },

    #[error(transparent)]
    Nbt(#[from] NbtError),

    #[error(transparent)]
    Region(#[from] RegionError),
}

/// Errors raised by block map construction.
#[derive(Debug, thiserror::Error)]
pub enum BlockMapError {
    #[error("invalid block map dimensions: {0}")]
    InvalidDimensions(String),

    #[error("block data has {actual} bytes, dimensions require {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Errors raised while scanning a world save directory.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("no chunk sections found under {0}")]
    NoChunks(PathBuf),
}
