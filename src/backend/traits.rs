//! Core backend abstraction traits
//!
//! The display only needs a narrow slice of a GPU API: compile the stroke
//! program, upload the glow texture, replace the contents of per-slot vertex
//! buffers, and draw a slot with a scalar alpha.

use crate::backend::types::*;
use crate::resources::GlowTexture;
use crate::shader::ProgramDescriptor;
use thiserror::Error;

/// Backend error type
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to initialize backend: {0}")]
    InitializationFailed(String),
    #[error("Failed to create device: {0}")]
    DeviceCreationFailed(String),
    #[error("Failed to create texture: {0}")]
    TextureCreationFailed(String),
    #[error("Failed to create program: {0}")]
    ProgramCreationFailed(String),
    #[error("Unknown buffer handle {0:?}")]
    UnknownBuffer(BufferHandle),
    #[error("Unknown texture handle {0:?}")]
    UnknownTexture(TextureHandle),
    #[error("Unknown program handle {0:?}")]
    UnknownProgram(ProgramHandle),
    #[error("Too many draws in one frame (limit {0})")]
    TooManyDraws(usize),
    #[error("No frame in progress")]
    NotInFrame,
    #[error("Failed to read back render target: {0}")]
    ReadbackFailed(String),
    #[error("Vertex count {0} does not fit a draw call")]
    VertexCountOverflow(usize),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Handle to a GPU vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) u64);

/// Handle to a GPU texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u64);

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub(crate) u64);

/// Rendering backend consumed by [`VectorDisplay`](crate::VectorDisplay).
///
/// A frame is bracketed by [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame); uploads may happen at any time, draws only
/// inside a frame.
pub trait DisplayBackend {
    /// Compile and link the stroke program.
    fn create_program(&mut self, desc: &ProgramDescriptor) -> BackendResult<ProgramHandle>;

    /// Upload the glow texture.
    fn upload_texture(&mut self, texture: &GlowTexture) -> BackendResult<TextureHandle>;

    /// Create an empty vertex buffer for one frame slot.
    fn create_vertex_buffer(&mut self, label: &str) -> BackendResult<BufferHandle>;

    /// Replace a slot's contents with `vertices`.
    fn upload_vertex_buffer(
        &mut self,
        buffer: BufferHandle,
        vertices: &[Vertex],
    ) -> BackendResult<()>;

    /// Clear the target and bind program, texture and matrices.
    fn begin_frame(
        &mut self,
        program: ProgramHandle,
        texture: TextureHandle,
        uniforms: &FrameUniforms,
    ) -> BackendResult<()>;

    /// Draw the first `vertex_count` vertices of `buffer` as a triangle list,
    /// modulating every fragment by `alpha`.
    fn draw_triangles(
        &mut self,
        buffer: BufferHandle,
        vertex_count: u32,
        alpha: f32,
    ) -> BackendResult<()>;

    /// Submit the frame.
    fn end_frame(&mut self) -> BackendResult<()>;

    // Resource cleanup

    fn destroy_buffer(&mut self, buffer: BufferHandle);

    fn destroy_texture(&mut self, texture: TextureHandle);

    fn destroy_program(&mut self, program: ProgramHandle);
}
