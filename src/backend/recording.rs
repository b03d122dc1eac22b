//! Recording backend for tests and headless hosts.
//!
//! This backend doesn't touch a GPU. It keeps the contents of every vertex
//! buffer and records each command in order, so a host can inspect exactly
//! what would have been drawn.

use std::collections::HashMap;

use crate::backend::traits::*;
use crate::backend::types::*;
use crate::frame_ring::vertex_count;
use crate::resources::GlowTexture;
use crate::shader::ProgramDescriptor;

/// A command issued to the [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    CreateProgram(ProgramHandle),
    UploadTexture { texture: TextureHandle, size: u32 },
    CreateBuffer(BufferHandle),
    Upload { buffer: BufferHandle, vertex_count: u32 },
    BeginFrame { uniforms: FrameUniforms },
    Draw { buffer: BufferHandle, vertex_count: u32, alpha: f32 },
    EndFrame,
    DestroyBuffer(BufferHandle),
    DestroyTexture(TextureHandle),
    DestroyProgram(ProgramHandle),
}

/// Backend that records commands instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<BackendCommand>,
    buffers: HashMap<u64, Vec<Vertex>>,
    next_id: u64,
    in_frame: bool,
    frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &'static str {
        "Recording Backend"
    }

    fn next_handle(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    /// Take all recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Draw calls recorded so far as `(buffer, vertex_count, alpha)`.
    pub fn draws(&self) -> Vec<(BufferHandle, u32, f32)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                BackendCommand::Draw {
                    buffer,
                    vertex_count,
                    alpha,
                } => Some((*buffer, *vertex_count, *alpha)),
                _ => None,
            })
            .collect()
    }

    /// Current contents of a vertex buffer.
    pub fn buffer_contents(&self, buffer: BufferHandle) -> Option<&[Vertex]> {
        self.buffers.get(&buffer.0).map(Vec::as_slice)
    }

    /// Number of live vertex buffers.
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DisplayBackend for RecordingBackend {
    fn create_program(&mut self, desc: &ProgramDescriptor) -> BackendResult<ProgramHandle> {
        if desc.wgsl.is_empty() {
            return Err(BackendError::ProgramCreationFailed(
                "empty shader source".into(),
            ));
        }
        let handle = ProgramHandle(self.next_handle());
        log::trace!("RecordingBackend: creating program {:?}", desc.label);
        self.commands.push(BackendCommand::CreateProgram(handle));
        Ok(handle)
    }

    fn upload_texture(&mut self, texture: &GlowTexture) -> BackendResult<TextureHandle> {
        let expected = (texture.size * texture.bytes_per_row()) as usize;
        if texture.data.len() != expected {
            return Err(BackendError::TextureCreationFailed(format!(
                "expected {} bytes, got {}",
                expected,
                texture.data.len()
            )));
        }
        let handle = TextureHandle(self.next_handle());
        self.commands.push(BackendCommand::UploadTexture {
            texture: handle,
            size: texture.size,
        });
        Ok(handle)
    }

    fn create_vertex_buffer(&mut self, label: &str) -> BackendResult<BufferHandle> {
        let handle = BufferHandle(self.next_handle());
        log::trace!("RecordingBackend: creating buffer {label}");
        self.buffers.insert(handle.0, Vec::new());
        self.commands.push(BackendCommand::CreateBuffer(handle));
        Ok(handle)
    }

    fn upload_vertex_buffer(
        &mut self,
        buffer: BufferHandle,
        vertices: &[Vertex],
    ) -> BackendResult<()> {
        let count = vertex_count(vertices.len())?;
        let contents = self
            .buffers
            .get_mut(&buffer.0)
            .ok_or(BackendError::UnknownBuffer(buffer))?;
        contents.clear();
        contents.extend_from_slice(vertices);
        self.commands.push(BackendCommand::Upload {
            buffer,
            vertex_count: count,
        });
        Ok(())
    }

    fn begin_frame(
        &mut self,
        _program: ProgramHandle,
        _texture: TextureHandle,
        uniforms: &FrameUniforms,
    ) -> BackendResult<()> {
        self.in_frame = true;
        self.commands.push(BackendCommand::BeginFrame {
            uniforms: *uniforms,
        });
        Ok(())
    }

    fn draw_triangles(
        &mut self,
        buffer: BufferHandle,
        vertex_count: u32,
        alpha: f32,
    ) -> BackendResult<()> {
        if !self.in_frame {
            return Err(BackendError::NotInFrame);
        }
        let stored = self
            .buffers
            .get(&buffer.0)
            .ok_or(BackendError::UnknownBuffer(buffer))?;
        debug_assert!(vertex_count as usize <= stored.len());
        self.commands.push(BackendCommand::Draw {
            buffer,
            vertex_count,
            alpha,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(BackendError::NotInFrame);
        }
        self.in_frame = false;
        self.frames += 1;
        self.commands.push(BackendCommand::EndFrame);
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        self.buffers.remove(&buffer.0);
        self.commands.push(BackendCommand::DestroyBuffer(buffer));
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.commands.push(BackendCommand::DestroyTexture(texture));
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.commands.push(BackendCommand::DestroyProgram(program));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_outside_frame_fails() {
        let mut backend = RecordingBackend::new();
        let buffer = backend.create_vertex_buffer("test").unwrap();
        assert!(matches!(
            backend.draw_triangles(buffer, 0, 1.0),
            Err(BackendError::NotInFrame)
        ));
    }

    #[test]
    fn test_upload_replaces_contents() {
        let mut backend = RecordingBackend::new();
        let buffer = backend.create_vertex_buffer("test").unwrap();
        let v = Vertex {
            position: [0.0; 3],
            color: [1.0; 4],
            tex_coord: [0.0; 2],
        };
        backend.upload_vertex_buffer(buffer, &[v, v, v]).unwrap();
        backend.upload_vertex_buffer(buffer, &[v]).unwrap();
        assert_eq!(backend.buffer_contents(buffer).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_buffer() {
        let mut backend = RecordingBackend::new();
        let result = backend.upload_vertex_buffer(BufferHandle(99), &[]);
        assert!(matches!(result, Err(BackendError::UnknownBuffer(_))));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut backend = RecordingBackend::new();
        let a = backend.create_vertex_buffer("a").unwrap();
        let b = backend.create_vertex_buffer("b").unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_buffers(), 2);
        backend.destroy_buffer(a);
        assert_eq!(backend.live_buffers(), 1);
    }
}
