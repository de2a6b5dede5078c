use std::fs;
use std::io::Write;
use std::path::Path;

use strata_world::BlockMap;

use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// Serialize a block map into the cache binary format.
///
/// Layout: header (48B) + LZ4 body of the dense block bytes.
pub fn save(map: &BlockMap) -> Vec<u8> {
    let body = compress::compress_blocks(map.as_bytes());
    let offset = map.offset();

    // Build header
    let header = CacheHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        _pad0: 0,
        offset_x: offset.x,
        offset_z: offset.z,
        size_x: map.size_x() as u32,
        size_z: map.size_z() as u32,
        min_y: map.min_y(),
        max_y: map.max_y(),
        raw_len: map.as_bytes().len() as u64,
        body_len: body.len() as u64,
    };

    let mut output = Vec::with_capacity(HEADER_SIZE + body.len());
    output.extend_from_slice(bytemuck::bytes_of(&header));
    output.extend_from_slice(&body);
    output
}

/// Write the cache to `path`. The data goes to a sibling temporary file that
/// is renamed into place, so an interrupted write never leaves a cache that
/// looks valid.
pub fn save_to_path(map: &BlockMap, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let bytes = save(map);
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut file = fs::File::create(tmp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)?;

    log::info!(
        "Saved block cache to {} ({} bytes, {} blocks)",
        path.display(),
        bytes.len(),
        map.as_bytes().len()
    );
    Ok(())
}
