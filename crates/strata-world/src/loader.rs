use std::fs;
use std::path::{Path, PathBuf};

use crate::chunk::{read_region_sections, ChunkSection};
use crate::error::{ChunkError, RegionError, WorldError};
use crate::region::{parse_region_name, RegionFile};

/// Subdirectory of a world save holding the region files.
pub const REGION_DIR: &str = "region";

/// Extension of region container files.
pub const REGION_EXTENSION: &str = "mca";

/// Decode every region file of a world save into chunk sections.
///
/// Files are visited in name order. A file that fails to decode is logged and
/// skipped; I/O failures (unreadable directory or file) abort the scan.
pub fn load_world(save_dir: &Path) -> Result<Vec<ChunkSection>, WorldError> {
    let region_dir = save_dir.join(REGION_DIR);
    let io_error = |path: &Path, source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&region_dir).map_err(|e| io_error(&region_dir, e))? {
        let path = entry.map_err(|e| io_error(&region_dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == REGION_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    log::info!("Found {} region files in {}", paths.len(), region_dir.display());

    let mut sections = Vec::new();
    for path in &paths {
        match load_region_file(path) {
            Ok(region_sections) => {
                log::debug!(
                    "{}: {} sections",
                    path.display(),
                    region_sections.len()
                );
                sections.extend(region_sections);
            }
            Err(ChunkError::Region(RegionError::Io(source))) => {
                return Err(io_error(path, source));
            }
            Err(err) => {
                log::warn!("Skipping region file {}: {}", path.display(), err);
            }
        }
    }

    if sections.is_empty() {
        return Err(WorldError::NoChunks(region_dir));
    }
    log::info!("Decoded {} chunk sections", sections.len());
    Ok(sections)
}

/// Decode one region file, taking its region index from the file name.
pub fn load_region_file(path: &Path) -> Result<Vec<ChunkSection>, ChunkError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RegionError::BadFileName(path.display().to_string()))?;
    let region = parse_region_name(name)?;
    let file = RegionFile::open(path)?;
    read_region_sections(&file, region)
}
