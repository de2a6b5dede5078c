use glam::{IVec2, IVec3};
use strata_core::constants::{BLOCKS_PER_SECTION, REGION_CHUNKS};
use strata_core::math::{section_index, section_origin, world_to_column};
use strata_core::types::{BlockId, ColumnCoord, WorldCoord};

use crate::error::ChunkError;
use crate::nbt::{self, TagKind, TagVisitor, Value, Visit};
use crate::region::RegionFile;

/// Name of the list holding a chunk's vertical sections.
const SECTIONS_TAG: &str = "Sections";
/// Section depth index (signed byte).
const SECTION_Y_TAG: &str = "Y";
/// Section block-ID array (4096 bytes).
const BLOCKS_TAG: &str = "Blocks";

/// One 16x16x16 slice of a chunk column.
///
/// `blocks` is in raster order: x fastest, then z, then y.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSection {
    pub position: WorldCoord,
    blocks: Box<[u8]>,
}

impl ChunkSection {
    /// Wrap a block array. Returns `None` unless it holds exactly 4096 IDs.
    pub fn new(position: WorldCoord, blocks: Vec<u8>) -> Option<Self> {
        (blocks.len() == BLOCKS_PER_SECTION).then(|| Self {
            position,
            blocks: blocks.into_boxed_slice(),
        })
    }

    /// Chunk column this section belongs to.
    pub fn column(&self) -> ColumnCoord {
        world_to_column(self.position)
    }

    /// Block at a local offset inside the section (each axis in 0..16).
    pub fn block(&self, local: IVec3) -> BlockId {
        BlockId(self.blocks[section_index(local)])
    }

    pub fn blocks(&self) -> &[u8] {
        &self.blocks
    }
}

#[derive(Default)]
struct PendingSection {
    y: Option<i8>,
    blocks: Option<Vec<u8>>,
}

/// Visitor that pulls `Sections[*].{Y, Blocks}` out of one chunk payload and
/// skips every other list.
pub struct SectionCollector {
    region: ColumnCoord,
    slot: IVec2,
    depth: usize,
    /// Depth of the compound that owns the sections list, while inside it.
    sections_depth: Option<usize>,
    current: Option<PendingSection>,
    sections: Vec<ChunkSection>,
    error: Option<String>,
}

impl SectionCollector {
    pub fn new(region: ColumnCoord, slot: IVec2) -> Self {
        Self {
            region,
            slot,
            depth: 0,
            sections_depth: None,
            current: None,
            sections: Vec::new(),
            error: None,
        }
    }

    fn in_section(&self) -> bool {
        self.current.is_some() && self.sections_depth.map(|d| d + 1) == Some(self.depth)
    }

    fn fail(&mut self, reason: String) -> Visit {
        self.error.get_or_insert(reason);
        Visit::Abort
    }

    /// Sections collected so far, or the first malformed-section error.
    pub fn finish(self) -> Result<Vec<ChunkSection>, ChunkError> {
        let column = self.region * REGION_CHUNKS + self.slot;
        match self.error {
            Some(reason) => Err(ChunkError::MalformedSection {
                x: column.x,
                z: column.y,
                reason,
            }),
            None => Ok(self.sections),
        }
    }
}

impl TagVisitor for SectionCollector {
    fn enter_compound(&mut self, _name: &str) -> Visit {
        if self.error.is_some() {
            return Visit::Abort;
        }
        self.depth += 1;
        if self.sections_depth.map(|d| d + 1) == Some(self.depth) {
            self.current = Some(PendingSection::default());
        }
        Visit::Descend
    }

    fn exit_compound(&mut self, _name: &str) {
        if self.in_section() {
            if let Some(pending) = self.current.take() {
                match (pending.y, pending.blocks) {
                    (Some(y), Some(blocks)) => {
                        let position = section_origin(self.region, self.slot, y as i32);
                        if let Some(section) = ChunkSection::new(position, blocks) {
                            self.sections.push(section);
                        }
                    }
                    (None, Some(_)) => {
                        self.fail("section has blocks but no Y".to_string());
                    }
                    // Fully empty sections carry no block array.
                    (_, None) => {}
                }
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn enter_list(&mut self, name: &str, element: TagKind, _len: usize) -> Visit {
        if self.error.is_some() {
            return Visit::Abort;
        }
        let wanted = name == SECTIONS_TAG
            && element == TagKind::Compound
            && self.sections_depth.is_none()
            && self.current.is_none();
        if wanted {
            self.sections_depth = Some(self.depth);
            Visit::Descend
        } else {
            Visit::Skip
        }
    }

    fn exit_list(&mut self, _name: &str) {
        if self.sections_depth == Some(self.depth) {
            self.sections_depth = None;
        }
    }

    fn value(&mut self, name: &str, value: Value<'_>) -> Visit {
        if !self.in_section() {
            return Visit::Descend;
        }
        match (name, value) {
            (SECTION_Y_TAG, Value::Byte(y)) => {
                if let Some(pending) = self.current.as_mut() {
                    pending.y = Some(y);
                }
            }
            (BLOCKS_TAG, Value::ByteArray(blocks)) => {
                if blocks.len() != BLOCKS_PER_SECTION {
                    return self.fail(format!(
                        "block array has {} bytes, expected {}",
                        blocks.len(),
                        BLOCKS_PER_SECTION
                    ));
                }
                if let Some(pending) = self.current.as_mut() {
                    pending.blocks = Some(blocks.to_vec());
                }
            }
            _ => {}
        }
        Visit::Descend
    }
}

/// Decode one chunk payload into its non-empty sections.
pub fn assemble_chunk(
    region: ColumnCoord,
    slot: IVec2,
    payload: &[u8],
) -> Result<Vec<ChunkSection>, ChunkError> {
    let mut collector = SectionCollector::new(region, slot);
    nbt::walk(payload, &mut collector)?;
    collector.finish()
}

/// Decode every present chunk of a region file. Any failure condemns the
/// whole file.
pub fn read_region_sections(
    file: &RegionFile,
    region: ColumnCoord,
) -> Result<Vec<ChunkSection>, ChunkError> {
    let mut sections = Vec::new();
    for slot in file.occupied_slots() {
        let mut collector = SectionCollector::new(region, slot);
        if file.read_chunk(slot.x, slot.y, &mut collector)?.is_some() {
            sections.extend(collector.finish()?);
        }
    }
    Ok(sections)
}
