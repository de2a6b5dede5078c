use std::path::Path;

use strata_world::BlockMap;

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// Load and parse a cache file from raw bytes.
pub fn load(bytes: &[u8]) -> Result<BlockMap, PersistError> {
    // Check minimum size (header only)
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::FileTooSmall(bytes.len(), HEADER_SIZE));
    }

    // Parse header
    let header: CacheHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    compat::validate_header(&header)?;

    let truncated = |expected: usize| PersistError::TruncatedFile {
        expected,
        actual: bytes.len(),
    };
    let body_end = (HEADER_SIZE as u64)
        .checked_add(header.body_len)
        .and_then(|end| usize::try_from(end).ok())
        .ok_or_else(|| truncated(usize::MAX))?;
    if bytes.len() < body_end {
        return Err(truncated(body_end));
    }

    let body = &bytes[HEADER_SIZE..body_end];
    let blocks = compress::decompress_blocks(body, header.raw_len as usize)?;

    BlockMap::from_raw(
        header.offset_x,
        header.offset_z,
        header.size_x as i32,
        header.size_z as i32,
        header.min_y,
        header.max_y,
        blocks,
    )
    .map_err(|e| PersistError::InvalidDimensions(e.to_string()))
}

/// Read and parse a cache file.
pub fn load_from_path(path: &Path) -> Result<BlockMap, PersistError> {
    let bytes = std::fs::read(path)?;
    let map = load(&bytes)?;
    log::info!(
        "Loaded block cache from {} ({} x {} x {} voxels)",
        path.display(),
        map.size_x(),
        map.height(),
        map.size_z()
    );
    Ok(map)
}
