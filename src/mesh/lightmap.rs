//! Lightmap UV scale/offset taken from the renderer that owns a mesh.

/// Renderer data the scene supplies alongside a mesh slice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RendererHint {
    /// `[scale.x, scale.y, offset.x, offset.y]` applied to lightmap UVs.
    pub lightmap_scale_offset: Option<[f32; 4]>,
}

impl RendererHint {
    pub fn with_lightmap(scale_offset: [f32; 4]) -> Self {
        Self {
            lightmap_scale_offset: Some(scale_offset),
        }
    }
}

/// Affine transform applied to 2-component lightmap coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightmapTransform {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

impl Default for LightmapTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LightmapTransform {
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0],
        offset: [0.0, 0.0],
    };

    pub fn from_hint(hint: Option<&RendererHint>) -> Self {
        match hint.and_then(|h| h.lightmap_scale_offset) {
            Some([sx, sy, ox, oy]) => Self {
                scale: [sx, sy],
                offset: [ox, oy],
            },
            None => Self::IDENTITY,
        }
    }

    /// Transform interleaved `(u, v)` pairs: even positions use x, odd use y.
    pub fn apply(&self, values: &[f32]) -> Vec<f32> {
        values
            .iter()
            .enumerate()
            .map(|(i, &raw)| {
                let axis = i % 2;
                raw * self.scale[axis] + self.offset[axis]
            })
            .collect()
    }
}
