/// Errors that can occur while writing or reading the voxel cache.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected STRM)")]
    InvalidMagic,

    #[error("unsupported cache format version {0}")]
    UnsupportedVersion(u16),

    #[error("file too small ({0} bytes, minimum {1})")]
    FileTooSmall(usize, usize),

    #[error("truncated file: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("invalid block data size: expected {expected}, got {actual}")]
    InvalidDataSize { expected: usize, actual: usize },

    #[error("invalid cache dimensions: {0}")]
    InvalidDimensions(String),

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}
