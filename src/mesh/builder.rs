//! Owned accumulator the chunk stream is folded into.

use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::mesh::chunk::{Chunk, SubmeshChunk, UvSet};
use crate::mesh::decoder::SubmeshCountPolicy;
use crate::mesh::lightmap::LightmapTransform;
use crate::mesh::record::{LIGHTMAP_CHANNEL, MeshHeader, MeshRecord, SubmeshRange, UV_CHANNELS};

/// Mesh state between the vertex block and the end of the chunk stream.
///
/// Each chunk is merged by value with [`MeshBuilder::apply`]; the builder is
/// threaded through the parse loop and consumed by [`MeshBuilder::finish`].
#[derive(Debug)]
pub struct MeshBuilder {
    vertex_count: usize,
    declared_submeshes: usize,
    lightmap: LightmapTransform,
    name: String,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    tangents: Vec<f32>,
    uv: [Option<UvSet>; UV_CHANNELS],
    indexes: Vec<u32>,
    submeshes: Vec<SubmeshRange>,
}

impl MeshBuilder {
    pub fn new(header: &MeshHeader, vertices: Vec<f32>, lightmap: LightmapTransform) -> Self {
        let vertex_count = vertices.len() / 3;
        Self {
            vertex_count,
            declared_submeshes: header.submesh_count as usize,
            lightmap,
            name: String::new(),
            vertices,
            normals: vec![0.0; vertex_count * 3],
            tangents: vec![0.0; vertex_count * 4],
            uv: Default::default(),
            indexes: Vec::new(),
            submeshes: Vec::new(),
        }
    }

    pub fn apply(mut self, chunk: Chunk) -> Self {
        match chunk {
            Chunk::End | Chunk::Colors => {}
            Chunk::Name(name) => self.name.push_str(&name),
            Chunk::Normals(normals) => self.normals = normals,
            Chunk::Tangents(tangents) => self.tangents = tangents,
            Chunk::Uv { channel, set } => {
                let set = if channel == LIGHTMAP_CHANNEL && set.components == 2 {
                    UvSet {
                        components: 2,
                        values: self.lightmap.apply(&set.values),
                    }
                } else {
                    set
                };
                if let Some(slot) = self.uv.get_mut(channel) {
                    *slot = Some(set);
                }
            }
            Chunk::Submesh(submesh) => self.push_submesh(submesh),
        }
        self
    }

    fn push_submesh(&mut self, submesh: SubmeshChunk) {
        let SubmeshChunk {
            topology, indices, ..
        } = submesh;
        self.submeshes.push(SubmeshRange {
            start: self.indexes.len(),
            count: indices.len(),
            topology,
        });
        self.indexes.extend(indices);
    }

    /// Check the submesh count and fill in a missing lightmap channel.
    pub fn finish(mut self, policy: SubmeshCountPolicy) -> MeshResult<MeshRecord> {
        let found = self.submeshes.len();
        if found != self.declared_submeshes {
            match policy {
                SubmeshCountPolicy::Strict => {
                    return Err(MeshError::InconsistentSubmeshCount {
                        declared: self.declared_submeshes,
                        found,
                    });
                }
                SubmeshCountPolicy::Warn => warn!(
                    declared = self.declared_submeshes,
                    found, "submesh count does not match header"
                ),
            }
        }

        if self.uv[LIGHTMAP_CHANNEL].is_none() {
            if let Some(primary) = &self.uv[0] {
                debug!("synthesizing lightmap UVs from UV0");
                let pairs: Vec<f32> = primary
                    .values
                    .chunks_exact(primary.components as usize)
                    .flat_map(|vertex| [vertex[0], vertex[1]])
                    .collect();
                self.uv[LIGHTMAP_CHANNEL] = Some(UvSet {
                    components: 2,
                    values: self.lightmap.apply(&pairs),
                });
            }
        }

        Ok(MeshRecord {
            name: self.name,
            vertex_count: self.vertex_count,
            vertices: self.vertices,
            normals: self.normals,
            tangents: self.tangents,
            uv: self.uv,
            indexes: self.indexes,
            submeshes: self.submeshes,
        })
    }
}
