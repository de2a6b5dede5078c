use crate::error::PersistError;
use crate::format::{CacheHeader, FORMAT_VERSION, MAGIC};

/// Validate a cache header before trusting its dimensions.
pub fn validate_header(header: &CacheHeader) -> Result<(), PersistError> {
    // Check magic
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    // Check version
    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    if header.size_x == 0 || header.size_z == 0 || header.min_y > header.max_y {
        return Err(PersistError::InvalidDimensions(format!(
            "{}x{} over y {}..={}",
            header.size_x, header.size_z, header.min_y, header.max_y
        )));
    }

    let height = (header.max_y as i64 - header.min_y as i64 + 1) as u64;
    let volume = (header.size_x as u64)
        .checked_mul(header.size_z as u64)
        .and_then(|area| area.checked_mul(height));
    if volume != Some(header.raw_len) {
        return Err(PersistError::InvalidDimensions(format!(
            "{}x{}x{} does not match {} stored blocks",
            header.size_x, height, header.size_z, header.raw_len
        )));
    }

    Ok(())
}
