#![allow(dead_code)]

/// Little-endian writer for synthetic mesh slices.
#[derive(Debug, Default, Clone)]
pub struct MeshWriter {
    pub bytes: Vec<u8>,
}

impl MeshWriter {
    pub fn new(vertex_count: u32, submesh_count: u32, vertices: &[f32]) -> Self {
        assert_eq!(vertices.len(), vertex_count as usize * 3);
        let mut w = Self::default();
        w.u32(0);
        w.u32(vertex_count);
        w.u32(submesh_count);
        w.f32s(vertices);
        w
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32s(&mut self, values: &[f32]) -> &mut Self {
        for v in values {
            self.bytes.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.u8(1).u8(name.len() as u8);
        self.bytes.extend_from_slice(name.as_bytes());
        self
    }

    pub fn normals(&mut self, values: &[f32]) -> &mut Self {
        self.u8(2).f32s(values)
    }

    pub fn tangents(&mut self, values: &[f32]) -> &mut Self {
        self.u8(3).f32s(values)
    }

    pub fn colors(&mut self, rgba: &[u8]) -> &mut Self {
        self.u8(4);
        self.bytes.extend_from_slice(rgba);
        self
    }

    pub fn uv(&mut self, channel: u8, components: u8, values: &[f32]) -> &mut Self {
        self.u8(6 + channel).u8(components).f32s(values)
    }

    /// Submesh chunk with indices encoded at `width` bytes each.
    pub fn submesh(&mut self, topology: u8, width: u8, indices: &[u32]) -> &mut Self {
        self.u8(10).u8(topology).i32(indices.len() as i32).u8(width);
        for &index in indices {
            match width {
                1 => {
                    self.u8(index as u8);
                }
                2 => {
                    self.u16(index as u16);
                }
                4 => {
                    self.i32(index as i32);
                }
                other => panic!("unsupported width {other}"),
            }
        }
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
