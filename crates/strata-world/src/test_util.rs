//! Fixture builders for NBT streams and region files.

use std::io::Write;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression as Level;
use glam::IVec2;
use strata_core::constants::{REGION_CHUNKS, REGION_SECTOR_BYTES, REGION_SLOTS};

use crate::nbt::TagKind;
use crate::region::Compression;

/// Minimal NBT writer. `named` writes a tag header; the payload methods write
/// bare payloads, which is also how list elements are written.
#[derive(Default)]
pub struct NbtWriter {
    buf: Vec<u8>,
}

impl NbtWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(&mut self, kind: TagKind, name: &str) -> &mut Self {
        self.buf.push(kind as u8);
        self.string(name)
    }

    pub fn byte(&mut self, v: i8) -> &mut Self {
        self.buf.push(v as u8);
        self
    }

    pub fn short(&mut self, v: i16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn int(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn long(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn float(&mut self, v: f32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn double(&mut self, v: f64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn string(&mut self, v: &str) -> &mut Self {
        self.buf.extend_from_slice(&(v.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(v.as_bytes());
        self
    }

    pub fn byte_array(&mut self, v: &[u8]) -> &mut Self {
        self.int(v.len() as i32);
        self.buf.extend_from_slice(v);
        self
    }

    pub fn int_array(&mut self, v: &[i32]) -> &mut Self {
        self.int(v.len() as i32);
        for &i in v {
            self.int(i);
        }
        self
    }

    pub fn long_array(&mut self, v: &[i64]) -> &mut Self {
        self.int(v.len() as i32);
        for &l in v {
            self.long(l);
        }
        self
    }

    pub fn list_header(&mut self, element: TagKind, len: i32) -> &mut Self {
        self.buf.push(element as u8);
        self.int(len)
    }

    pub fn end(&mut self) -> &mut Self {
        self.buf.push(TagKind::End as u8);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A chunk payload in the legacy layout: root → Level → Sections, plus some
/// sibling data the assembler has to step over.
pub fn chunk_nbt(sections: &[(i8, Option<Vec<u8>>)]) -> Vec<u8> {
    let mut w = NbtWriter::new();
    w.named(TagKind::Compound, "");
    w.named(TagKind::Compound, "Level");
    w.named(TagKind::Int, "xPos").int(0);
    w.named(TagKind::List, "Entities").list_header(TagKind::Compound, 1);
    w.named(TagKind::String, "id").string("Zombie");
    w.named(TagKind::List, "Pos").list_header(TagKind::Double, 3);
    w.double(0.5).double(12.0).double(0.5);
    w.end();
    w.named(TagKind::List, "Sections")
        .list_header(TagKind::Compound, sections.len() as i32);
    for (y, blocks) in sections {
        w.named(TagKind::Byte, "Y").byte(*y);
        if let Some(blocks) = blocks {
            w.named(TagKind::ByteArray, "Blocks").byte_array(blocks);
        }
        w.named(TagKind::ByteArray, "SkyLight").byte_array(&[0xFF; 2048]);
        w.end();
    }
    w.named(TagKind::IntArray, "HeightMap").int_array(&[64; 256]);
    w.end();
    w.end();
    w.into_bytes()
}

/// Assemble a region file from `(slot, compression, raw payload)` entries.
pub fn region_bytes(chunks: &[(IVec2, Compression, Vec<u8>)]) -> Vec<u8> {
    let mut locations = vec![0u32; REGION_SLOTS];
    let mut body = Vec::new();
    let mut sector = 2u32;

    for (slot, compression, payload) in chunks {
        let compressed = compress(*compression, payload);
        let mut record = Vec::new();
        record.extend_from_slice(&((compressed.len() + 1) as u32).to_be_bytes());
        record.push(*compression as u8);
        record.extend_from_slice(&compressed);
        let sectors = record.len().div_ceil(REGION_SECTOR_BYTES);
        record.resize(sectors * REGION_SECTOR_BYTES, 0);

        let index = (slot.x + slot.y * REGION_CHUNKS) as usize;
        locations[index] = (sector << 8) | sectors as u32;
        sector += sectors as u32;
        body.extend_from_slice(&record);
    }

    let mut out = Vec::with_capacity(2 * REGION_SECTOR_BYTES + body.len());
    for location in locations {
        out.extend_from_slice(&location.to_be_bytes());
    }
    out.resize(2 * REGION_SECTOR_BYTES, 0);
    out.extend_from_slice(&body);
    out
}

fn compress(compression: Compression, payload: &[u8]) -> Vec<u8> {
    match compression {
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Level::default());
            encoder.write_all(payload).expect("gzip write");
            encoder.finish().expect("gzip finish")
        }
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Level::default());
            encoder.write_all(payload).expect("zlib write");
            encoder.finish().expect("zlib finish")
        }
        Compression::Uncompressed => payload.to_vec(),
    }
}

/// Section block array where every voxel holds `id`.
pub fn filled_blocks(id: u8) -> Vec<u8> {
    vec![id; strata_core::constants::BLOCKS_PER_SECTION]
}
