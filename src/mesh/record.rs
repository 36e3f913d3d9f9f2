use crate::mesh::chunk::UvSet;

/// Number of UV channels a mesh can carry.
pub const UV_CHANNELS: usize = 4;

/// Channel that holds lightmap coordinates.
pub const LIGHTMAP_CHANNEL: usize = 1;

/// Fixed 12-byte header at the start of every mesh slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    /// Bytes `[0, 4)`; not interpreted.
    pub reserved: u32,
    pub vertex_count: u32,
    pub submesh_count: u32,
}

impl MeshHeader {
    pub const SIZE: usize = 12;
}

/// A contiguous slice of [`MeshRecord::indexes`] drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmeshRange {
    pub start: usize,
    pub count: usize,
    /// Topology byte from the Submesh chunk, carried through uninterpreted.
    pub topology: u8,
}

/// A fully decoded mesh slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshRecord {
    pub name: String,
    pub vertex_count: usize,
    /// `vertex_count * 3` positions.
    pub vertices: Vec<f32>,
    /// `vertex_count * 3`, zero unless the slice had a Normals chunk.
    pub normals: Vec<f32>,
    /// `vertex_count * 4`, zero unless the slice had a Tangents chunk.
    pub tangents: Vec<f32>,
    pub uv: [Option<UvSet>; UV_CHANNELS],
    pub indexes: Vec<u32>,
    pub submeshes: Vec<SubmeshRange>,
}

impl MeshRecord {
    pub fn uv(&self, channel: usize) -> Option<&UvSet> {
        self.uv.get(channel).and_then(Option::as_ref)
    }

    pub fn lightmap_uv(&self) -> Option<&UvSet> {
        self.uv(LIGHTMAP_CHANNEL)
    }

    /// Indices belonging to one submesh.
    pub fn submesh_indexes(&self, submesh: usize) -> Option<&[u32]> {
        let range = self.submeshes.get(submesh)?;
        self.indexes.get(range.start..range.start + range.count)
    }

    /// Topology byte of the last submesh, if any.
    pub fn topology(&self) -> Option<u8> {
        self.submeshes.last().map(|range| range.topology)
    }
}
