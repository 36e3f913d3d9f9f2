/// Error definitions
pub mod error;
/// Chunked binary mesh decoding
pub mod mesh;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;
/// Scene blob and node descriptor handling around the mesh decoder
pub mod scene;

pub use error::{MeshError, SceneError};
pub use mesh::{MeshRecord, RendererHint, decode_mesh, decode_mesh_async};
