use std::io::Read;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use flate2::read::{GzDecoder, ZlibDecoder};
use glam::IVec2;
use strata_core::constants::{REGION_CHUNKS, REGION_SECTOR_BYTES, REGION_SLOTS};
use strata_core::types::ColumnCoord;

use crate::error::RegionError;
use crate::nbt::{self, TagVisitor, Traversal};

/// Location table followed by the timestamp table, one u32 per slot each.
pub const HEADER_BYTES: usize = 2 * 4 * REGION_SLOTS;

/// Chunk payload length prefix plus compression byte.
const PAYLOAD_PREFIX: usize = 5;

/// Payload compression scheme, as stored in the byte after the length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Compression {
    Gzip = 1,
    Zlib = 2,
    Uncompressed = 3,
}

impl TryFrom<u8> for Compression {
    type Error = RegionError;

    fn try_from(id: u8) -> Result<Self, RegionError> {
        match id {
            1 => Ok(Compression::Gzip),
            2 => Ok(Compression::Zlib),
            3 => Ok(Compression::Uncompressed),
            other => Err(RegionError::UnsupportedCompression(other)),
        }
    }
}

/// A region container held in memory: 32x32 chunk slots, each pointing at a
/// run of 4 KiB sectors holding one compressed chunk payload.
pub struct RegionFile {
    data: Vec<u8>,
    locations: Vec<u32>,
}

impl RegionFile {
    pub fn open(path: &Path) -> Result<Self, RegionError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Parse the header of an in-memory region file. A zero-length file is an
    /// empty region (the game leaves these behind).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RegionError> {
        if data.is_empty() {
            return Ok(Self {
                data,
                locations: vec![0; REGION_SLOTS],
            });
        }
        if data.len() < HEADER_BYTES {
            return Err(RegionError::HeaderTooSmall(data.len(), HEADER_BYTES));
        }

        let mut locations = vec![0u32; REGION_SLOTS];
        BigEndian::read_u32_into(&data[..4 * REGION_SLOTS], &mut locations);
        Ok(Self { data, locations })
    }

    fn slot_index(x: i32, z: i32) -> Result<usize, RegionError> {
        if !(0..REGION_CHUNKS).contains(&x) || !(0..REGION_CHUNKS).contains(&z) {
            return Err(RegionError::SlotOutOfRange(x, z));
        }
        Ok((x + z * REGION_CHUNKS) as usize)
    }

    /// Whether slot (x, z) holds a chunk. Out-of-range slots hold nothing.
    pub fn has_chunk(&self, x: i32, z: i32) -> bool {
        Self::slot_index(x, z).is_ok_and(|index| self.locations[index] != 0)
    }

    /// Number of occupied slots.
    pub fn chunk_count(&self) -> usize {
        self.locations.iter().filter(|&&entry| entry != 0).count()
    }

    /// Occupied slots in storage order (x fastest).
    pub fn occupied_slots(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..REGION_CHUNKS)
            .flat_map(|z| (0..REGION_CHUNKS).map(move |x| IVec2::new(x, z)))
            .filter(|slot| self.has_chunk(slot.x, slot.y))
    }

    /// Decompressed tag-tree payload of slot (x, z), or `None` if the slot is empty.
    pub fn chunk_data(&self, x: i32, z: i32) -> Result<Option<Vec<u8>>, RegionError> {
        let entry = self.locations[Self::slot_index(x, z)?];
        if entry == 0 {
            return Ok(None);
        }

        let start = (entry >> 8) as usize * REGION_SECTOR_BYTES;
        let capacity = (entry & 0xFF) as usize * REGION_SECTOR_BYTES;
        if start + PAYLOAD_PREFIX > self.data.len() {
            return Err(RegionError::PayloadOutOfBounds {
                offset: start,
                file_len: self.data.len(),
            });
        }

        let length = BigEndian::read_u32(&self.data[start..start + 4]) as usize;
        if length == 0 || length + 4 > capacity {
            return Err(RegionError::SectorOverflow { length, capacity });
        }
        let end = start + 4 + length;
        if end > self.data.len() {
            return Err(RegionError::PayloadOutOfBounds {
                offset: end,
                file_len: self.data.len(),
            });
        }

        let compression = Compression::try_from(self.data[start + 4])?;
        let payload = &self.data[start + PAYLOAD_PREFIX..end];
        decompress(compression, payload).map(Some)
    }

    /// Decode slot (x, z) straight into `visitor`. `None` if the slot is empty.
    pub fn read_chunk<V: TagVisitor + ?Sized>(
        &self,
        x: i32,
        z: i32,
        visitor: &mut V,
    ) -> Result<Option<Traversal>, RegionError> {
        match self.chunk_data(x, z)? {
            Some(bytes) => Ok(Some(nbt::walk(bytes.as_slice(), visitor)?)),
            None => Ok(None),
        }
    }
}

fn decompress(compression: Compression, payload: &[u8]) -> Result<Vec<u8>, RegionError> {
    let mut out = Vec::new();
    match compression {
        Compression::Gzip => GzDecoder::new(payload)
            .read_to_end(&mut out)
            .map_err(RegionError::Decompress)?,
        Compression::Zlib => ZlibDecoder::new(payload)
            .read_to_end(&mut out)
            .map_err(RegionError::Decompress)?,
        Compression::Uncompressed => {
            out.extend_from_slice(payload);
            payload.len()
        }
    };
    Ok(out)
}

/// Parse the region index encoded in a file name of the form `r.<x>.<z>.mca`.
pub fn parse_region_name(name: &str) -> Result<ColumnCoord, RegionError> {
    let bad = || RegionError::BadFileName(name.to_string());
    let coords = name
        .strip_prefix("r.")
        .and_then(|rest| rest.strip_suffix(".mca"))
        .ok_or_else(bad)?;
    let (x, z) = coords.split_once('.').ok_or_else(bad)?;
    let x = x.parse::<i32>().map_err(|_| bad())?;
    let z = z.parse::<i32>().map_err(|_| bad())?;
    Ok(IVec2::new(x, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{chunk_nbt, filled_blocks, region_bytes};

    fn sample_payload() -> Vec<u8> {
        chunk_nbt(&[(0, Some(filled_blocks(1)))])
    }

    #[test]
    fn test_slot_presence() {
        let bytes = region_bytes(&[
            (IVec2::new(0, 0), Compression::Zlib, sample_payload()),
            (IVec2::new(31, 5), Compression::Zlib, sample_payload()),
        ]);
        let region = RegionFile::from_bytes(bytes).expect("header should parse");
        assert!(region.has_chunk(0, 0));
        assert!(region.has_chunk(31, 5));
        assert!(!region.has_chunk(5, 31));
        assert!(!region.has_chunk(32, 0));
        assert!(!region.has_chunk(-1, 0));
        assert_eq!(region.chunk_count(), 2);
        assert_eq!(
            region.occupied_slots().collect::<Vec<_>>(),
            vec![IVec2::new(0, 0), IVec2::new(31, 5)]
        );
    }

    #[test]
    fn test_every_compression_decodes() {
        let payload = sample_payload();
        let bytes = region_bytes(&[
            (IVec2::new(0, 0), Compression::Gzip, payload.clone()),
            (IVec2::new(1, 0), Compression::Zlib, payload.clone()),
            (IVec2::new(2, 0), Compression::Uncompressed, payload.clone()),
        ]);
        let region = RegionFile::from_bytes(bytes).expect("header should parse");
        for x in 0..3 {
            let data = region.chunk_data(x, 0).expect("chunk should decode");
            assert_eq!(data.as_deref(), Some(payload.as_slice()), "slot {x}");
        }
        assert!(region.chunk_data(3, 0).expect("empty slot").is_none());
    }

    #[test]
    fn test_unsupported_compression_rejected() {
        let mut bytes = region_bytes(&[(IVec2::new(0, 0), Compression::Zlib, sample_payload())]);
        bytes[HEADER_BYTES + 4] = 9;
        let region = RegionFile::from_bytes(bytes).expect("header should parse");
        assert!(matches!(
            region.chunk_data(0, 0),
            Err(RegionError::UnsupportedCompression(9))
        ));
    }

    #[test]
    fn test_corrupt_payload_rejected() {
        let mut bytes = region_bytes(&[(IVec2::new(0, 0), Compression::Zlib, sample_payload())]);
        for byte in &mut bytes[HEADER_BYTES + 5..HEADER_BYTES + 20] {
            *byte = 0xAA;
        }
        let region = RegionFile::from_bytes(bytes).expect("header should parse");
        assert!(matches!(region.chunk_data(0, 0), Err(RegionError::Decompress(_))));
    }

    #[test]
    fn test_payload_past_end_rejected() {
        let mut bytes = region_bytes(&[(IVec2::new(0, 0), Compression::Zlib, sample_payload())]);
        // Point slot (1, 0) at a sector far beyond the file.
        bytes[4..8].copy_from_slice(&((500u32 << 8) | 1).to_be_bytes());
        let region = RegionFile::from_bytes(bytes).expect("header should parse");
        assert!(matches!(
            region.chunk_data(1, 0),
            Err(RegionError::PayloadOutOfBounds { .. })
        ));
    }

    #[derive(Default)]
    struct NameRecorder {
        compounds: Vec<String>,
    }

    impl TagVisitor for NameRecorder {
        fn enter_compound(&mut self, name: &str) -> nbt::Visit {
            self.compounds.push(name.to_string());
            nbt::Visit::Descend
        }

        fn enter_list(&mut self, _name: &str, _element: nbt::TagKind, _len: usize) -> nbt::Visit {
            nbt::Visit::Skip
        }
    }

    #[test]
    fn test_read_chunk_drives_visitor() {
        let bytes = region_bytes(&[(IVec2::new(4, 2), Compression::Gzip, sample_payload())]);
        let region = RegionFile::from_bytes(bytes).expect("header should parse");

        let mut recorder = NameRecorder::default();
        let traversal = region
            .read_chunk(4, 2, &mut recorder)
            .expect("chunk should decode");
        assert_eq!(traversal, Some(Traversal::Completed));
        assert_eq!(recorder.compounds, vec!["", "Level"]);

        let mut untouched = NameRecorder::default();
        assert_eq!(region.read_chunk(0, 0, &mut untouched).expect("empty slot"), None);
        assert!(untouched.compounds.is_empty());
    }

    #[test]
    fn test_short_header_rejected() {
        let result = RegionFile::from_bytes(vec![0u8; 100]);
        assert!(matches!(result, Err(RegionError::HeaderTooSmall(100, HEADER_BYTES))));
    }

    #[test]
    fn test_empty_file_is_empty_region() {
        let region = RegionFile::from_bytes(Vec::new()).expect("empty file is valid");
        assert_eq!(region.chunk_count(), 0);
    }

    #[test]
    fn test_out_of_range_slot_rejected() {
        let region = RegionFile::from_bytes(Vec::new()).expect("empty file is valid");
        assert!(matches!(
            region.chunk_data(0, 32),
            Err(RegionError::SlotOutOfRange(0, 32))
        ));
    }

    #[test]
    fn test_parse_region_name() {
        assert_eq!(parse_region_name("r.0.0.mca").expect("valid"), IVec2::new(0, 0));
        assert_eq!(parse_region_name("r.-3.12.mca").expect("valid"), IVec2::new(-3, 12));
    }

    #[test]
    fn test_parse_region_name_rejects_malformed() {
        for name in ["r.1.mca", "x.1.2.mca", "r.1.2.mcr", "r.a.2.mca", "r.1.2.3.mca", "r..2.mca"] {
            assert!(
                matches!(parse_region_name(name), Err(RegionError::BadFileName(_))),
                "{name} should be rejected"
            );
        }
    }
}
