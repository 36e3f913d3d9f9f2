//! Renderer-facing view of a decoded mesh: named vertex attributes, one index
//! buffer, and one draw group per submesh.

use crate::mesh::record::MeshRecord;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeSemantic {
    Position,
    Normal,
    Tangent,
    TexCoord0,
    /// Lightmap coordinates.
    TexCoord1,
    TexCoord2,
    TexCoord3,
}

impl AttributeSemantic {
    const TEX_COORDS: [AttributeSemantic; 4] = [
        AttributeSemantic::TexCoord0,
        AttributeSemantic::TexCoord1,
        AttributeSemantic::TexCoord2,
        AttributeSemantic::TexCoord3,
    ];

    /// Attribute name as bound by the renderer.
    pub fn name(self) -> &'static str {
        match self {
            AttributeSemantic::Position => "position",
            AttributeSemantic::Normal => "normal",
            AttributeSemantic::Tangent => "tangent",
            AttributeSemantic::TexCoord0 => "uv",
            AttributeSemantic::TexCoord1 => "uv2",
            AttributeSemantic::TexCoord2 => "uv3",
            AttributeSemantic::TexCoord3 => "uv4",
        }
    }

    pub fn tex_coord(channel: usize) -> Option<Self> {
        Self::TEX_COORDS.get(channel).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryAttribute {
    pub semantic: AttributeSemantic,
    /// Values per element as declared to the renderer.
    pub item_size: usize,
    pub data: Vec<f32>,
}

impl GeometryAttribute {
    /// Number of whole elements in `data` at the declared item size.
    pub fn count(&self) -> usize {
        self.data.len() / self.item_size
    }
}

/// Index range drawn with the material at `material_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryGroup {
    pub start: usize,
    pub count: usize,
    pub material_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub name: String,
    pub attributes: Vec<GeometryAttribute>,
    pub index: Vec<u32>,
    pub groups: Vec<GeometryGroup>,
}

impl Geometry {
    pub fn attribute(&self, semantic: AttributeSemantic) -> Option<&GeometryAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }
}

impl MeshRecord {
    pub fn into_geometry(self) -> Geometry {
        let mut attributes = vec![
            GeometryAttribute {
                semantic: AttributeSemantic::Position,
                item_size: 3,
                data: self.vertices,
            },
            GeometryAttribute {
                semantic: AttributeSemantic::Normal,
                item_size: 3,
                data: self.normals,
            },
            // Tangents are stored 4-wide but bound 3-wide, as the exporter expects.
            GeometryAttribute {
                semantic: AttributeSemantic::Tangent,
                item_size: 3,
                data: self.tangents,
            },
        ];

        for (channel, set) in self.uv.into_iter().enumerate() {
            let (Some(set), Some(semantic)) = (set, AttributeSemantic::tex_coord(channel)) else {
                continue;
            };
            if set.values.is_empty() {
                continue;
            }
            attributes.push(GeometryAttribute {
                semantic,
                item_size: set.components as usize,
                data: set.values,
            });
        }

        let groups = self
            .submeshes
            .iter()
            .enumerate()
            .map(|(material_index, range)| GeometryGroup {
                start: range.start,
                count: range.count,
                material_index,
            })
            .collect();

        Geometry {
            name: self.name,
            attributes,
            index: self.indexes,
            groups,
        }
    }
}
