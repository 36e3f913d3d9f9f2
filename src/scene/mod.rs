/// Mesh blob decompression
pub mod blob;
/// Scene description JSON
#[cfg(feature = "json")]
pub mod descriptor;
/// Per-node mesh decoding
#[cfg(feature = "json")]
pub mod loader;

pub use blob::{decompress_blob, is_gzip};
#[cfg(feature = "json")]
pub use descriptor::{MeshKind, NodeDescriptor, RendererDescriptor, SceneDescription, Transform};
#[cfg(feature = "json")]
pub use loader::{LoadedMesh, NodeFailure, SceneMeshes, load_scene_meshes};
