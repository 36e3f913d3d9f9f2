/// Owned accumulator for chunk results
pub mod builder;
/// Chunk tags and body parsers
pub mod chunk;
/// Slice decoding entry points
pub mod decoder;
/// Renderer-facing geometry assembly
pub mod geometry;
/// Lightmap UV scale/offset handling
pub mod lightmap;
/// Bounds-checked little-endian readers
pub mod reader;
/// Decoded mesh types
pub mod record;

pub use chunk::{ChunkId, UvSet};
pub use decoder::{
    DecodeOptions, MeshSlice, SubmeshCountPolicy, decode_mesh, decode_mesh_async, decode_slice,
};
pub use geometry::{AttributeSemantic, Geometry, GeometryAttribute, GeometryGroup};
pub use lightmap::{LightmapTransform, RendererHint};
pub use record::{MeshHeader, MeshRecord, SubmeshRange};
