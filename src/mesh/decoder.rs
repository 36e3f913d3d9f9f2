//! Entry points for decoding one mesh slice out of a scene blob.
//!
//! A slice is laid out as a 12-byte header, `vertex_count * 3` little-endian
//! `f32` positions, and then a stream of tagged chunks that runs to the end of
//! the slice. See [`crate::mesh::chunk`] for the chunk bodies.

use bon::Builder;
use tracing::debug;
use winnow::Parser;
use winnow::binary::le_u32;

use crate::error::{MeshError, MeshResult};
use crate::mesh::builder::MeshBuilder;
use crate::mesh::chunk::{parse_chunk, per_vertex};
use crate::mesh::lightmap::{LightmapTransform, RendererHint};
use crate::mesh::reader::{SliceReader, WResult};
use crate::mesh::record::{MeshHeader, MeshRecord};

/// Location of one mesh inside a larger buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshSlice {
    pub offset: usize,
    pub length: usize,
}

/// What to do when the header's submesh count disagrees with the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmeshCountPolicy {
    /// Fail with [`MeshError::InconsistentSubmeshCount`].
    #[default]
    Strict,
    /// Log a warning and keep the submeshes that were found.
    Warn,
}

#[derive(Clone, Builder, Debug, Default)]
pub struct DecodeOptions {
    /// Source of the lightmap scale/offset for UV channel 1.
    pub renderer: Option<RendererHint>,
    #[builder(default)]
    pub submesh_count: SubmeshCountPolicy,
}

/// Decode the mesh stored at `buffer[offset..offset + length]`.
pub fn decode_mesh(
    buffer: &[u8],
    offset: usize,
    length: usize,
    renderer: Option<&RendererHint>,
) -> MeshResult<MeshRecord> {
    let options = DecodeOptions::builder()
        .maybe_renderer(renderer.copied())
        .build();
    decode_slice(buffer, MeshSlice { offset, length }, &options)
}

/// Deferred form of [`decode_mesh`] for async call sites.
///
/// Decoding does no I/O; the future completes on its first poll.
pub async fn decode_mesh_async(
    buffer: &[u8],
    offset: usize,
    length: usize,
    renderer: Option<&RendererHint>,
) -> MeshResult<MeshRecord> {
    decode_mesh(buffer, offset, length, renderer)
}

pub fn decode_slice(
    buffer: &[u8],
    slice: MeshSlice,
    options: &DecodeOptions,
) -> MeshResult<MeshRecord> {
    let region = slice
        .offset
        .checked_add(slice.length)
        .and_then(|end| buffer.get(slice.offset..end))
        .ok_or(MeshError::RegionOutOfBounds {
            offset: slice.offset,
            length: slice.length,
            available: buffer.len(),
        })?;

    let mut reader = SliceReader::new(region, slice.offset);

    let header = reader.parse("mesh header", MeshHeader::SIZE, parse_header)?;
    debug!(
        offset = slice.offset,
        length = slice.length,
        vertex_count = header.vertex_count,
        submesh_count = header.submesh_count,
        "decoding mesh"
    );

    let vertex_count =
        usize::try_from(header.vertex_count).map_err(|_| MeshError::SizeOverflow {
            vertex_count: header.vertex_count,
        })?;
    let vertices = reader.f32_array("vertex block", per_vertex(vertex_count, 3)?)?;

    let lightmap = LightmapTransform::from_hint(options.renderer.as_ref());
    let mut builder = MeshBuilder::new(&header, vertices, lightmap);
    while !reader.is_empty() {
        let chunk = parse_chunk(&mut reader, vertex_count)?;
        builder = builder.apply(chunk);
    }

    builder.finish(options.submesh_count)
}

fn parse_header(input: &mut &[u8]) -> WResult<MeshHeader> {
    let reserved = le_u32.parse_next(input)?;
    let vertex_count = le_u32.parse_next(input)?;
    let submesh_count = le_u32.parse_next(input)?;
    Ok(MeshHeader {
        reserved,
        vertex_count,
        submesh_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_past_end_of_buffer() {
        let buffer = [0u8; 16];
        match decode_mesh(&buffer, 8, 12, None).unwrap_err() {
            MeshError::RegionOutOfBounds {
                offset,
                length,
                available,
            } => {
                assert_eq!((offset, length, available), (8, 12, 16));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn slice_offset_overflow() {
        assert!(matches!(
            decode_mesh(&[0u8; 4], usize::MAX, 2, None),
            Err(MeshError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn short_header() {
        assert!(matches!(
            decode_mesh(&[0u8; 8], 0, 8, None),
            Err(MeshError::Truncated {
                what: "mesh header",
                offset: 0,
                needed: 12,
                available: 8
            })
        ));
    }

    #[test]
    fn options_builder_defaults_to_strict() {
        let options = DecodeOptions::builder().build();
        assert_eq!(options.submesh_count, SubmeshCountPolicy::Strict);
        assert!(options.renderer.is_none());
    }
}
