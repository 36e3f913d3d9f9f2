//! Chunk tags and per-chunk body parsers.
//!
//! Each chunk starts with a one-byte tag. The tag alone determines the body
//! layout; there is no per-chunk length prefix, so a tag without a known
//! layout cannot be skipped.

use tracing::trace;

use crate::error::{MeshError, MeshResult};
use crate::mesh::reader::SliceReader;
use crate::recognized::Recognized;

/// Chunk tag values as written by the scene exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChunkId {
    End = 0,
    Name = 1,
    Normals = 2,
    Tangents = 3,
    Colors = 4,
    BoneWeights = 5,
    Uv0 = 6,
    Uv1 = 7,
    Uv2 = 8,
    Uv3 = 9,
    Submesh = 10,
    Bindposes = 11,
    BlendShape = 12,
}

impl ChunkId {
    pub fn from_tag(tag: u8) -> Recognized<ChunkId> {
        let id = match tag {
            0 => ChunkId::End,
            1 => ChunkId::Name,
            2 => ChunkId::Normals,
            3 => ChunkId::Tangents,
            4 => ChunkId::Colors,
            5 => ChunkId::BoneWeights,
            6 => ChunkId::Uv0,
            7 => ChunkId::Uv1,
            8 => ChunkId::Uv2,
            9 => ChunkId::Uv3,
            10 => ChunkId::Submesh,
            11 => ChunkId::Bindposes,
            12 => ChunkId::BlendShape,
            other => return Recognized::Unknown(other),
        };
        Recognized::Known(id)
    }

    /// UV channel carried by this chunk, if it is one of the UV chunks.
    pub fn uv_channel(self) -> Option<usize> {
        match self {
            ChunkId::Uv0 | ChunkId::Uv1 | ChunkId::Uv2 | ChunkId::Uv3 => {
                Some(self as usize - ChunkId::Uv0 as usize)
            }
            _ => None,
        }
    }
}

/// How submesh indices are stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U8,
    U16,
    /// Signed 32-bit. Negative values are rejected.
    I32,
}

impl IndexWidth {
    pub fn from_byte(width: u8) -> Option<Self> {
        match width {
            1 => Some(IndexWidth::U8),
            2 => Some(IndexWidth::U16),
            4 => Some(IndexWidth::I32),
            _ => None,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            IndexWidth::U8 => 1,
            IndexWidth::U16 => 2,
            IndexWidth::I32 => 4,
        }
    }
}

/// One texture coordinate channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UvSet {
    /// Values per vertex: 2, 3 or 4.
    pub components: u8,
    /// `vertex_count * components` values, vertex-interleaved.
    pub values: Vec<f32>,
}

/// Body of a Submesh chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmeshChunk {
    pub topology: u8,
    pub width: IndexWidth,
    pub indices: Vec<u32>,
}

/// A decoded chunk, ready to be folded into a [`MeshBuilder`].
///
/// [`MeshBuilder`]: crate::mesh::builder::MeshBuilder
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// Zero-length marker.
    End,
    Name(String),
    Normals(Vec<f32>),
    Tangents(Vec<f32>),
    /// Vertex colors are validated and consumed but not retained.
    Colors,
    Uv { channel: usize, set: UvSet },
    Submesh(SubmeshChunk),
}

/// Read the next tag and its body.
///
/// `vertex_count` sizes the per-vertex bodies. Exactly the bytes the tag
/// declares are consumed, or an error is returned.
pub fn parse_chunk(reader: &mut SliceReader<'_>, vertex_count: usize) -> MeshResult<Chunk> {
    let offset = reader.position();
    let tag = reader.u8("chunk tag")?;

    let id = match ChunkId::from_tag(tag) {
        Recognized::Known(id) => id,
        Recognized::Unknown(tag) => return Err(MeshError::UnknownChunkTag { tag, offset }),
    };
    trace!(?id, offset, "chunk");

    let chunk = match id {
        ChunkId::End => Chunk::End,
        ChunkId::Name => {
            let len = reader.u8("name length")? as usize;
            let bytes = reader.bytes("name", len)?;
            // One byte per character, no multi-byte decoding.
            Chunk::Name(bytes.iter().map(|&b| char::from(b)).collect())
        }
        ChunkId::Normals => {
            Chunk::Normals(reader.f32_array("normals", per_vertex(vertex_count, 3)?)?)
        }
        ChunkId::Tangents => {
            Chunk::Tangents(reader.f32_array("tangents", per_vertex(vertex_count, 4)?)?)
        }
        ChunkId::Colors => {
            reader.bytes("colors", per_vertex(vertex_count, 4)?)?;
            Chunk::Colors
        }
        ChunkId::Uv0 | ChunkId::Uv1 | ChunkId::Uv2 | ChunkId::Uv3 => {
            let channel = id.uv_channel().unwrap_or_default();
            let set = parse_uv_set(reader, channel, vertex_count)?;
            Chunk::Uv { channel, set }
        }
        ChunkId::Submesh => Chunk::Submesh(parse_submesh(reader)?),
        ChunkId::BoneWeights | ChunkId::Bindposes | ChunkId::BlendShape => {
            return Err(MeshError::UnsupportedChunk { chunk: id, offset });
        }
    };

    Ok(chunk)
}

fn parse_uv_set(
    reader: &mut SliceReader<'_>,
    channel: usize,
    vertex_count: usize,
) -> MeshResult<UvSet> {
    let offset = reader.position();
    let components = reader.u8("uv component count")?;
    if !(2..=4).contains(&components) {
        return Err(MeshError::InvalidComponentCount {
            channel,
            components,
            offset,
        });
    }

    let count = per_vertex(vertex_count, components as usize)?;
    let values = reader.f32_array("uv values", count)?;
    Ok(UvSet { components, values })
}

fn parse_submesh(reader: &mut SliceReader<'_>) -> MeshResult<SubmeshChunk> {
    let topology = reader.u8("submesh topology")?;

    let count_offset = reader.position();
    let count = reader.i32("submesh index count")?;
    let count = usize::try_from(count).map_err(|_| MeshError::NegativeIndexCount {
        count,
        offset: count_offset,
    })?;

    let width_offset = reader.position();
    let width_byte = reader.u8("submesh index width")?;
    let width = IndexWidth::from_byte(width_byte).ok_or(MeshError::InvalidIndexWidth {
        width: width_byte,
        offset: width_offset,
    })?;

    let start = reader.position();
    let indices = match width {
        IndexWidth::U8 => reader
            .u8_array("submesh indices", count)?
            .into_iter()
            .map(u32::from)
            .collect(),
        IndexWidth::U16 => reader
            .u16_array("submesh indices", count)?
            .into_iter()
            .map(u32::from)
            .collect(),
        IndexWidth::I32 => reader
            .i32_array("submesh indices", count)?
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                u32::try_from(value).map_err(|_| MeshError::NegativeIndex {
                    value,
                    offset: start + i * width.bytes(),
                })
            })
            .collect::<MeshResult<Vec<u32>>>()?,
    };

    Ok(SubmeshChunk {
        topology,
        width,
        indices,
    })
}

/// Number of values for `components` per vertex, guarding against overflow.
pub(crate) fn per_vertex(vertex_count: usize, components: usize) -> MeshResult<usize> {
    vertex_count
        .checked_mul(components)
        .ok_or(MeshError::SizeOverflow {
            vertex_count: u32::try_from(vertex_count).unwrap_or(u32::MAX),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8], vertex_count: usize) -> MeshResult<Chunk> {
        let mut reader = SliceReader::new(bytes, 0);
        let chunk = parse_chunk(&mut reader, vertex_count)?;
        assert!(reader.is_empty(), "chunk left {} bytes", reader.remaining());
        Ok(chunk)
    }

    #[test]
    fn tags_round_into_ids() {
        assert_eq!(ChunkId::from_tag(7).known(), Some(&ChunkId::Uv1));
        assert_eq!(ChunkId::from_tag(10).known(), Some(&ChunkId::Submesh));
        assert_eq!(ChunkId::from_tag(13).unknown(), Some(&13));
        assert_eq!(ChunkId::Uv3.uv_channel(), Some(3));
        assert_eq!(ChunkId::Normals.uv_channel(), None);
    }

    #[test]
    fn name_widens_each_byte() {
        let chunk = parse(&[1, 3, b'a', 0xE9, b'z'], 0).unwrap();
        assert_eq!(chunk, Chunk::Name("a\u{e9}z".to_string()));
    }

    #[test]
    fn colors_consume_four_bytes_per_vertex() {
        let chunk = parse(&[4, 1, 2, 3, 4, 5, 6, 7, 8], 2).unwrap();
        assert_eq!(chunk, Chunk::Colors);
    }

    #[test]
    fn u16_submesh() {
        let mut bytes = vec![10, 3];
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.push(2);
        bytes.extend_from_slice(&300u16.to_le_bytes());
        bytes.extend_from_slice(&7u16.to_le_bytes());
        let Chunk::Submesh(submesh) = parse(&bytes, 0).unwrap() else {
            panic!("expected submesh");
        };
        assert_eq!(submesh.topology, 3);
        assert_eq!(submesh.width, IndexWidth::U16);
        assert_eq!(submesh.indices, vec![300, 7]);
    }

    #[test]
    fn negative_index_reports_its_offset() {
        let mut bytes = vec![10, 0];
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.push(4);
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        match parse(&bytes, 0).unwrap_err() {
            MeshError::NegativeIndex { value, offset } => {
                assert_eq!(value, -1);
                assert_eq!(offset, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_index_count() {
        let mut bytes = vec![10, 0];
        bytes.extend_from_slice(&(-3i32).to_le_bytes());
        bytes.push(1);
        assert!(matches!(
            parse(&bytes, 0),
            Err(MeshError::NegativeIndexCount { count: -3, offset: 2 })
        ));
    }

    #[test]
    fn uv_component_count_is_checked() {
        assert!(matches!(
            parse(&[8, 5], 1),
            Err(MeshError::InvalidComponentCount {
                channel: 2,
                components: 5,
                offset: 1
            })
        ));
    }

    #[test]
    fn reserved_tags_are_unsupported() {
        for (tag, id) in [
            (5, ChunkId::BoneWeights),
            (11, ChunkId::Bindposes),
            (12, ChunkId::BlendShape),
        ] {
            match parse(&[tag], 1).unwrap_err() {
                MeshError::UnsupportedChunk { chunk, offset } => {
                    assert_eq!(chunk, id);
                    assert_eq!(offset, 0);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
