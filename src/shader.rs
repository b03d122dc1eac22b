//! Stroke program sources
//!
//! Both programs transform the position by projection * model-view and output
//! `vertex_color * glow_sample * vec4(1, 1, 1, alpha)`. The display does not
//! interpret them; they are handed to the backend as-is.

use crate::backend::{BlendState, Vertex, VertexBufferLayout};

/// WGSL program used by the wgpu backend.
///
/// Group 0 holds the matrices, glow texture and sampler; group 1 holds the
/// per-draw alpha (bound with a dynamic offset).
pub const PHOSPHOR_SHADER_WGSL: &str = r#"
struct Matrices {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
}

struct FrameAlpha {
    alpha: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

@group(0) @binding(0) var<uniform> matrices: Matrices;
@group(0) @binding(1) var glow_texture: texture_2d<f32>;
@group(0) @binding(2) var glow_sampler: sampler;
@group(1) @binding(0) var<uniform> frame: FrameAlpha;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) tex_coord: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) tex_coord: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.position = matrices.projection * matrices.model_view * vec4<f32>(input.position, 1.0);
    output.color = input.color;
    output.tex_coord = input.tex_coord;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let glow = textureSample(glow_texture, glow_sampler, input.tex_coord);
    return input.color * glow * vec4<f32>(1.0, 1.0, 1.0, frame.alpha);
}
"#;

/// GLSL ES 1.00 vertex program for GL-style backends.
pub const PHOSPHOR_VERTEX_GLSL: &str = r#"
uniform mat4 inProjectionMatrix;
uniform mat4 inModelViewMatrix;

attribute vec2 inTexCoord;
attribute vec4 inPosition;
attribute vec4 inColor;

varying vec4 Color;
varying vec2 TexCoord;

void main()
{
    gl_Position = inProjectionMatrix * inModelViewMatrix * inPosition;
    Color       = inColor;
    TexCoord    = inTexCoord;
}
"#;

/// GLSL ES 1.00 fragment program for GL-style backends.
pub const PHOSPHOR_FRAGMENT_GLSL: &str = r#"
precision mediump float;

uniform sampler2D tex1;
uniform float alpha;

varying vec4 Color;
varying vec2 TexCoord;

void main() {
    gl_FragColor = Color * texture2D(tex1, TexCoord.st) * vec4(1.0, 1.0, 1.0, alpha);
}
"#;

/// Everything a backend needs to build the stroke program.
#[derive(Debug, Clone)]
pub struct ProgramDescriptor {
    pub label: Option<String>,
    pub wgsl: &'static str,
    pub glsl_vertex: &'static str,
    pub glsl_fragment: &'static str,
    pub vertex_layout: VertexBufferLayout,
    pub blend: BlendState,
}

impl ProgramDescriptor {
    /// The fixed phosphor stroke program.
    pub fn phosphor() -> Self {
        Self {
            label: Some("phosphor_stroke".into()),
            wgsl: PHOSPHOR_SHADER_WGSL,
            glsl_vertex: PHOSPHOR_VERTEX_GLSL,
            glsl_fragment: PHOSPHOR_FRAGMENT_GLSL,
            vertex_layout: Vertex::layout(),
            blend: BlendState::PHOSPHOR,
        }
    }
}
