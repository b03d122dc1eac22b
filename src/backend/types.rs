//! Common types shared between backends

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Texture format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba8Unorm,
}

impl TextureFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm => 4,
        }
    }
}

/// Vertex attribute format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    pub fn size(&self) -> u64 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// Vertex attribute description
#[derive(Debug, Clone)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub offset: u64,
}

/// Vertex buffer layout
#[derive(Debug, Clone)]
pub struct VertexBufferLayout {
    pub array_stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

/// Shader attribute locations for [`Vertex`].
pub const VERTEX_POSITION_LOCATION: u32 = 0;
pub const VERTEX_COLOR_LOCATION: u32 = 1;
pub const VERTEX_TEX_COORD_LOCATION: u32 = 2;

/// A committed stroke vertex: position, color and glow texture coordinate.
///
/// Color is copied at emission time, so later color changes never affect
/// vertices that were already emitted.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub fn layout() -> VertexBufferLayout {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            attributes: vec![
                VertexAttribute {
                    location: VERTEX_POSITION_LOCATION,
                    format: VertexFormat::Float32x3,
                    offset: 0,
                },
                VertexAttribute {
                    location: VERTEX_COLOR_LOCATION,
                    format: VertexFormat::Float32x4,
                    offset: 12,
                },
                VertexAttribute {
                    location: VERTEX_TEX_COORD_LOCATION,
                    format: VertexFormat::Float32x2,
                    offset: 28,
                },
            ],
        }
    }
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    SrcAlpha,
    DstAlpha,
}

/// Blend state applied to every stroke draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
}

impl BlendState {
    /// Source weighted by its alpha, destination weighted by its own alpha.
    ///
    /// With an opaque clear color this accumulates the trail additively.
    pub const PHOSPHOR: Self = Self {
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::DstAlpha,
    };
}

/// Per-frame uniforms handed to the backend when a frame begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub model_view: Mat4,
    /// Color the target is cleared to before any slot is drawn.
    pub clear_color: [f32; 4],
}

/// GPU layout of [`FrameUniforms`] matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MatrixUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
}

impl From<&FrameUniforms> for MatrixUniforms {
    fn from(uniforms: &FrameUniforms) -> Self {
        Self {
            projection: uniforms.projection.to_cols_array_2d(),
            model_view: uniforms.model_view.to_cols_array_2d(),
        }
    }
}

/// GPU layout of the per-draw alpha uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct AlphaUniform {
    pub alpha: f32,
    pub _padding: [f32; 3],
}

impl AlphaUniform {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 36);
        let end = layout
            .attributes
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap();
        assert_eq!(end, layout.array_stride);
    }

    #[test]
    fn test_vertex_is_pod() {
        let v = Vertex {
            position: [1.0, 2.0, 3.0],
            color: [1.0; 4],
            tex_coord: [0.5, 0.25],
        };
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        let back: &Vertex = bytemuck::from_bytes(bytes);
        assert_eq!(*back, v);
    }

    #[test]
    fn test_phosphor_blend_adds_onto_destination() {
        assert_eq!(BlendState::PHOSPHOR.src_factor, BlendFactor::SrcAlpha);
        assert_eq!(BlendState::PHOSPHOR.dst_factor, BlendFactor::DstAlpha);
        assert_eq!(TextureFormat::Rgba8Unorm.bytes_per_pixel(), 4);
    }
}
