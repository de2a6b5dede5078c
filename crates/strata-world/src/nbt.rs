//! Streaming decoder for the big-endian NBT tag-tree format.
//!
//! The decoder pushes a depth-first event sequence into a [`TagVisitor`].
//! The visitor's answer to `enter_compound` / `enter_list` decides whether the
//! decoder walks the node's children, consumes them silently, or stops.

use std::io::{self, Read};
use std::ops::ControlFlow;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::error::NbtError;

/// Maximum compound/list nesting accepted before the stream is rejected.
pub const MAX_DEPTH: usize = 512;

/// Tag type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TryFrom<u8> for TagKind {
    type Error = NbtError;

    fn try_from(id: u8) -> Result<Self, NbtError> {
        Ok(match id {
            0 => TagKind::End,
            1 => TagKind::Byte,
            2 => TagKind::Short,
            3 => TagKind::Int,
            4 => TagKind::Long,
            5 => TagKind::Float,
            6 => TagKind::Double,
            7 => TagKind::ByteArray,
            8 => TagKind::String,
            9 => TagKind::List,
            10 => TagKind::Compound,
            11 => TagKind::IntArray,
            12 => TagKind::LongArray,
            other => return Err(NbtError::UnknownTag(other)),
        })
    }
}

/// A scalar or array payload, borrowed from the decoder for the duration of
/// one `value` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(&'a str),
    ByteArray(&'a [u8]),
    IntArray(&'a [i32]),
    LongArray(&'a [i64]),
}

/// Visitor answer controlling traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Walk the node's children (or keep going after a value).
    Descend,
    /// Consume the node without events. No exit event follows.
    Skip,
    /// Stop the whole traversal.
    Abort,
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Completed,
    Aborted,
}

/// Receives decoder events. List elements are reported with the name `""`.
pub trait TagVisitor {
    fn enter_compound(&mut self, _name: &str) -> Visit {
        Visit::Descend
    }

    fn exit_compound(&mut self, _name: &str) {}

    fn enter_list(&mut self, _name: &str, _element: TagKind, _len: usize) -> Visit {
        Visit::Descend
    }

    fn exit_list(&mut self, _name: &str) {}

    fn value(&mut self, _name: &str, _value: Value<'_>) -> Visit {
        Visit::Descend
    }

    fn end(&mut self) {}
}

/// Decode one root tag from `reader`, driving `visitor`.
pub fn walk<R: Read, V: TagVisitor + ?Sized>(
    reader: R,
    visitor: &mut V,
) -> Result<Traversal, NbtError> {
    NbtReader::new(reader).walk(visitor)
}

pub struct NbtReader<R> {
    reader: R,
}

impl<R: Read> NbtReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn walk<V: TagVisitor + ?Sized>(&mut self, visitor: &mut V) -> Result<Traversal, NbtError> {
        let kind = self.read_kind()?;
        if kind != TagKind::End {
            let name = self.read_string()?;
            if self.read_payload(kind, &name, visitor, 0)?.is_break() {
                return Ok(Traversal::Aborted);
            }
        }
        visitor.end();
        Ok(Traversal::Completed)
    }

    fn read_payload<V: TagVisitor + ?Sized>(
        &mut self,
        kind: TagKind,
        name: &str,
        visitor: &mut V,
        depth: usize,
    ) -> Result<ControlFlow<()>, NbtError> {
        let visit = match kind {
            TagKind::End => return Err(NbtError::UnknownTag(0)),
            TagKind::Compound => {
                let depth = nested(depth)?;
                match visitor.enter_compound(name) {
                    Visit::Abort => return Ok(ControlFlow::Break(())),
                    Visit::Skip => {
                        self.skip_payload(kind, depth)?;
                        return Ok(ControlFlow::Continue(()));
                    }
                    Visit::Descend => {}
                }
                loop {
                    let child_kind = self.read_kind()?;
                    if child_kind == TagKind::End {
                        break;
                    }
                    let child_name = self.read_string()?;
                    if self
                        .read_payload(child_kind, &child_name, visitor, depth)?
                        .is_break()
                    {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                visitor.exit_compound(name);
                return Ok(ControlFlow::Continue(()));
            }
            TagKind::List => {
                let depth = nested(depth)?;
                let (element, len) = self.read_list_header()?;
                match visitor.enter_list(name, element, len) {
                    Visit::Abort => return Ok(ControlFlow::Break(())),
                    Visit::Skip => {
                        self.skip_elements(element, len, depth)?;
                        return Ok(ControlFlow::Continue(()));
                    }
                    Visit::Descend => {}
                }
                for _ in 0..len {
                    if self.read_payload(element, "", visitor, depth)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                visitor.exit_list(name);
                return Ok(ControlFlow::Continue(()));
            }
            TagKind::Byte => visitor.value(name, Value::Byte(self.reader.read_i8()?)),
            TagKind::Short => visitor.value(name, Value::Short(self.reader.read_i16::<BigEndian>()?)),
            TagKind::Int => visitor.value(name, Value::Int(self.reader.read_i32::<BigEndian>()?)),
            TagKind::Long => visitor.value(name, Value::Long(self.reader.read_i64::<BigEndian>()?)),
            TagKind::Float => visitor.value(name, Value::Float(self.reader.read_f32::<BigEndian>()?)),
            TagKind::Double => {
                visitor.value(name, Value::Double(self.reader.read_f64::<BigEndian>()?))
            }
            TagKind::String => {
                let value = self.read_string()?;
                visitor.value(name, Value::String(&value))
            }
            TagKind::ByteArray => {
                let len = self.read_len()?;
                let bytes = self.read_bytes(len)?;
                visitor.value(name, Value::ByteArray(&bytes))
            }
            TagKind::IntArray => {
                let len = self.read_len()?;
                let bytes = self.read_bytes(len * 4)?;
                let mut ints = vec![0i32; len];
                BigEndian::read_i32_into(&bytes, &mut ints);
                visitor.value(name, Value::IntArray(&ints))
            }
            TagKind::LongArray => {
                let len = self.read_len()?;
                let bytes = self.read_bytes(len * 8)?;
                let mut longs = vec![0i64; len];
                BigEndian::read_i64_into(&bytes, &mut longs);
                visitor.value(name, Value::LongArray(&longs))
            }
        };

        Ok(match visit {
            Visit::Abort => ControlFlow::Break(()),
            Visit::Descend | Visit::Skip => ControlFlow::Continue(()),
        })
    }

    /// Consume a payload without reporting it.
    fn skip_payload(&mut self, kind: TagKind, depth: usize) -> Result<(), NbtError> {
        match kind {
            TagKind::End => return Err(NbtError::UnknownTag(0)),
            TagKind::Byte => self.skip_bytes(1)?,
            TagKind::Short => self.skip_bytes(2)?,
            TagKind::Int | TagKind::Float => self.skip_bytes(4)?,
            TagKind::Long | TagKind::Double => self.skip_bytes(8)?,
            TagKind::ByteArray => {
                let len = self.read_len()?;
                self.skip_bytes(len)?;
            }
            TagKind::IntArray => {
                let len = self.read_len()?;
                self.skip_bytes(len * 4)?;
            }
            TagKind::LongArray => {
                let len = self.read_len()?;
                self.skip_bytes(len * 8)?;
            }
            TagKind::String => {
                let len = self.reader.read_u16::<BigEndian>()? as usize;
                self.skip_bytes(len)?;
            }
            TagKind::List => {
                let depth = nested(depth)?;
                let (element, len) = self.read_list_header()?;
                self.skip_elements(element, len, depth)?;
            }
            TagKind::Compound => loop {
                let child_kind = self.read_kind()?;
                if child_kind == TagKind::End {
                    break;
                }
                let name_len = self.reader.read_u16::<BigEndian>()? as usize;
                self.skip_bytes(name_len)?;
                self.skip_payload(child_kind, nested(depth)?)?;
            },
        }
        Ok(())
    }

    fn skip_elements(&mut self, element: TagKind, len: usize, depth: usize) -> Result<(), NbtError> {
        for _ in 0..len {
            self.skip_payload(element, depth)?;
        }
        Ok(())
    }

    fn read_kind(&mut self) -> Result<TagKind, NbtError> {
        TagKind::try_from(self.reader.read_u8()?)
    }

    fn read_len(&mut self) -> Result<usize, NbtError> {
        let len = self.reader.read_i32::<BigEndian>()?;
        usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))
    }

    fn read_list_header(&mut self) -> Result<(TagKind, usize), NbtError> {
        let element = self.read_kind()?;
        let len = self.read_len()?;
        if element == TagKind::End && len > 0 {
            return Err(NbtError::EndList(len as i32));
        }
        Ok((element, len))
    }

    fn read_string(&mut self) -> Result<String, NbtError> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        let bytes = self.read_bytes(len)?;
        // Names and strings are modified UTF-8; anything non-standard is replaced.
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    /// Read exactly `len` bytes, growing the buffer as data arrives so a
    /// corrupt length cannot force a huge up-front allocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, NbtError> {
        let mut bytes = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(NbtError::Truncated);
        }
        Ok(bytes)
    }

    fn skip_bytes(&mut self, len: usize) -> Result<(), NbtError> {
        let skipped = io::copy(&mut (&mut self.reader).take(len as u64), &mut io::sink())?;
        if skipped != len as u64 {
            return Err(NbtError::Truncated);
        }
        Ok(())
    }
}

fn nested(depth: usize) -> Result<usize, NbtError> {
    let depth = depth + 1;
    if depth > MAX_DEPTH {
        return Err(NbtError::TooDeep(MAX_DEPTH));
    }
    Ok(depth)
}
