use crate::error::PersistError;

/// Compress the dense block array using LZ4.
pub fn compress_blocks(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Decompress an LZ4 body, validating the output size.
pub fn decompress_blocks(compressed: &[u8], expected: usize) -> Result<Vec<u8>, PersistError> {
    let decompressed = lz4_flex::decompress_size_prepended(compressed)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;

    if decompressed.len() != expected {
        return Err(PersistError::InvalidDataSize {
            expected,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}
