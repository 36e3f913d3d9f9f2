//! Decode every mesh-bearing node of a scene.
//!
//! Each node decodes its own disjoint slice of the shared blob, so nodes are
//! independent. Results land at their node index; a node that fails to decode
//! is logged and left out without affecting its siblings.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::MeshError;
use crate::mesh::{DecodeOptions, Geometry, decode_slice};
use crate::scene::descriptor::{MeshKind, NodeDescriptor, SceneDescription, Transform};

/// A successfully decoded node mesh.
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub node_index: usize,
    pub node_name: String,
    pub kind: MeshKind,
    pub geometry: Geometry,
    pub transform: Option<Transform>,
    /// One material per geometry group, by position.
    pub material_guids: Vec<String>,
    pub tag: Option<String>,
}

#[derive(Debug)]
pub struct NodeFailure {
    pub node_index: usize,
    pub node_name: String,
    pub error: MeshError,
}

#[derive(Debug, Default)]
pub struct SceneMeshes {
    /// Indexed by node; `None` for nodes without a mesh or whose decode failed.
    pub meshes: Vec<Option<LoadedMesh>>,
    pub failures: Vec<NodeFailure>,
}

impl SceneMeshes {
    /// Loaded meshes in node order.
    pub fn loaded(&self) -> impl Iterator<Item = &LoadedMesh> {
        self.meshes.iter().flatten()
    }

    pub fn get(&self, node_index: usize) -> Option<&LoadedMesh> {
        self.meshes.get(node_index).and_then(Option::as_ref)
    }
}

enum NodeOutcome {
    Skipped,
    Loaded(Box<LoadedMesh>),
    Failed(NodeFailure),
}

/// Decode all meshes referenced by `scene` out of the decompressed `blob`.
pub fn load_scene_meshes(scene: &SceneDescription, blob: &[u8]) -> SceneMeshes {
    #[cfg(feature = "parallel")]
    let outcomes: Vec<NodeOutcome> = scene
        .nodes
        .par_iter()
        .enumerate()
        .map(|(index, node)| load_node(index, node, blob))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<NodeOutcome> = scene
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| load_node(index, node, blob))
        .collect();

    let mut result = SceneMeshes {
        meshes: vec![None; scene.nodes.len()],
        failures: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            NodeOutcome::Skipped => {}
            NodeOutcome::Loaded(mesh) => {
                let index = mesh.node_index;
                result.meshes[index] = Some(*mesh);
            }
            NodeOutcome::Failed(failure) => result.failures.push(failure),
        }
    }
    result.failures.sort_by_key(|f| f.node_index);

    info!(
        nodes = scene.nodes.len(),
        loaded = result.loaded().count(),
        failed = result.failures.len(),
        "scene meshes decoded"
    );
    result
}

fn load_node(node_index: usize, node: &NodeDescriptor, blob: &[u8]) -> NodeOutcome {
    let Some(kind) = node.mesh_kind() else {
        return NodeOutcome::Skipped;
    };

    let fail = |error: MeshError| {
        warn!(node_index, name = %node.name, %error, "skipping node: mesh decode failed");
        NodeOutcome::Failed(NodeFailure {
            node_index,
            node_name: node.name.clone(),
            error,
        })
    };

    let Some(slice) = node.mesh_slice() else {
        return fail(MeshError::MissingSlice);
    };

    let renderer = match kind {
        MeshKind::Rendered => node.renderer(),
        MeshKind::Collider => None,
    };
    let options = DecodeOptions::builder()
        .maybe_renderer(renderer.map(|r| r.hint()))
        .build();

    match decode_slice(blob, slice, &options) {
        Ok(record) => {
            debug!(node_index, name = %node.name, vertices = record.vertex_count, "node mesh decoded");
            NodeOutcome::Loaded(Box::new(LoadedMesh {
                node_index,
                node_name: node.name.clone(),
                kind,
                geometry: record.into_geometry(),
                transform: node.transform,
                material_guids: renderer.map(|r| r.material_guids.clone()).unwrap_or_default(),
                tag: node.tag.clone(),
            }))
        }
        Err(error) => fail(error),
    }
}
