use thiserror::Error;

use crate::mesh::chunk::ChunkId;

/// Errors raised while decoding a single mesh slice.
///
/// Offsets are absolute positions in the buffer handed to the decoder.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error(
        "mesh slice 0x{offset:X}+0x{length:X} extends beyond buffer (have 0x{available:X})"
    )]
    RegionOutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
    #[error("{what} at 0x{offset:X} is truncated (need 0x{needed:X}, have 0x{available:X})")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("unknown chunk tag {tag} at 0x{offset:X}")]
    UnknownChunkTag { tag: u8, offset: usize },
    #[error("{chunk:?} chunk at 0x{offset:X} has no known body layout")]
    UnsupportedChunk { chunk: ChunkId, offset: usize },
    #[error("header declares {declared} submeshes but the chunk stream holds {found}")]
    InconsistentSubmeshCount { declared: usize, found: usize },
    #[error("invalid index width {width} at 0x{offset:X} (expected 1, 2 or 4)")]
    InvalidIndexWidth { width: u8, offset: usize },
    #[error("UV{channel} declares {components} components at 0x{offset:X} (expected 2, 3 or 4)")]
    InvalidComponentCount {
        channel: usize,
        components: u8,
        offset: usize,
    },
    #[error("negative index count {count} at 0x{offset:X}")]
    NegativeIndexCount { count: i32, offset: usize },
    #[error("negative index value {value} at 0x{offset:X}")]
    NegativeIndex { value: i32, offset: usize },
    #[error("vertex count {vertex_count} overflows the addressable size")]
    SizeOverflow { vertex_count: u32 },
    #[error("node has a mesh but no meshBufferOffset/meshBufferLength")]
    MissingSlice,
}

/// Errors raised while preparing scene inputs for decoding.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to decompress mesh blob")]
    Decompress(#[source] std::io::Error),
    #[cfg(feature = "json")]
    #[error("failed to parse scene description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MeshResult<T> = Result<T, MeshError>;
