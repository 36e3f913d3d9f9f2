//! Scene description JSON, reduced to what mesh loading needs.
//!
//! Field names follow the exporter's JSON. Unlisted fields (materials,
//! textures, reflection probes, ...) are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SceneError;
use crate::mesh::{MeshSlice, RendererHint};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<Vec4> for [f32; 4] {
    fn from(v: Vec4) -> Self {
        [v.x, v.y, v.z, v.w]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub position: Vec3,
    /// Quaternion.
    #[serde(default = "identity_rotation")]
    pub rotation: Vec4,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(rename = "ParentID", default)]
    pub parent_id: Option<i64>,
}

fn identity_rotation() -> Vec4 {
    Vec4 {
        w: 1.0,
        ..Vec4::default()
    }
}

fn unit_scale() -> Vec3 {
    Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RendererDescriptor {
    #[serde(rename = "materialNames", default)]
    pub material_names: Vec<String>,
    #[serde(rename = "materialGuids", default)]
    pub material_guids: Vec<String>,
    #[serde(rename = "lightmapindex", default)]
    pub lightmap_index: Option<i32>,
    #[serde(rename = "lightmapscaleoffset", default)]
    pub lightmap_scale_offset: Option<Vec4>,
}

impl RendererDescriptor {
    pub fn hint(&self) -> RendererHint {
        RendererHint {
            lightmap_scale_offset: self.lightmap_scale_offset.map(Into::into),
        }
    }
}

/// How a node's mesh slice is used by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshKind {
    /// Drawn with the node's first renderer.
    Rendered,
    /// Collision-only mesh; decoded without a renderer hint.
    Collider,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "meshname", default)]
    pub mesh_name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(rename = "objectID", default)]
    pub object_id: Option<i64>,
    #[serde(rename = "trans", default)]
    pub transform: Option<Transform>,
    #[serde(rename = "meshrenderer", default)]
    pub renderers: Vec<RendererDescriptor>,
    #[serde(rename = "meshcollider", default)]
    pub mesh_colliders: Vec<Value>,
    #[serde(rename = "boxcollider", default)]
    pub box_colliders: Vec<Value>,
    #[serde(default)]
    pub text: Vec<Value>,
    #[serde(rename = "meshBufferOffset", default)]
    pub mesh_buffer_offset: Option<usize>,
    #[serde(rename = "meshBufferLength", default)]
    pub mesh_buffer_length: Option<usize>,
}

impl NodeDescriptor {
    pub fn mesh_slice(&self) -> Option<MeshSlice> {
        Some(MeshSlice {
            offset: self.mesh_buffer_offset?,
            length: self.mesh_buffer_length?,
        })
    }

    /// Renderers take priority; text nodes and box colliders carry no mesh.
    pub fn mesh_kind(&self) -> Option<MeshKind> {
        if !self.renderers.is_empty() {
            Some(MeshKind::Rendered)
        } else if !self.text.is_empty() {
            None
        } else if !self.mesh_colliders.is_empty() {
            Some(MeshKind::Collider)
        } else {
            None
        }
    }

    pub fn renderer(&self) -> Option<&RendererDescriptor> {
        self.renderers.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(rename = "meshUrl", default)]
    pub mesh_url: Option<String>,
    #[serde(rename = "meshGUID", default)]
    pub mesh_guid: Option<String>,
    #[serde(rename = "objectID", default)]
    pub object_id: Option<i64>,
}

impl SceneDescription {
    pub fn from_json(json: &[u8]) -> Result<Self, SceneError> {
        Ok(serde_json::from_slice(json)?)
    }
}
