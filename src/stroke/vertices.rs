use crate::backend::Vertex;
use crate::resources::TEXTURE_SIZE;

/// Depth plane every stroke is emitted at.
pub const STROKE_DEPTH: f32 = 10000.0;

/// Initial vertex capacity of the committed buffer.
const INITIAL_CAPACITY: usize = 60;

/// The current frame's tessellated geometry.
///
/// Every three consecutive vertices form one triangle. The caller clears the
/// buffer once per frame after it has been uploaded.
#[derive(Debug, Clone)]
pub struct CommittedVertices {
    vertices: Vec<Vertex>,
}

impl CommittedVertices {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Drop all vertices, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Append one vertex.
    ///
    /// `(x, y)` is snapped to the pixel center by adding 0.5. `(u, v)` are in
    /// glow-texture pixels; they are normalized and `v` is flipped so that
    /// texture row 0 maps to the bottom.
    #[inline]
    pub fn push_tex_point(&mut self, x: f64, y: f64, u: f64, v: f64, color: [f32; 4]) {
        let size = TEXTURE_SIZE as f32;
        self.vertices.push(Vertex {
            position: [(x + 0.5) as f32, (y + 0.5) as f32, STROKE_DEPTH],
            color,
            tex_coord: [u as f32 / size, 1.0 - (v as f32 / size)],
        });
    }
}

impl Default for CommittedVertices {
    fn default() -> Self {
        Self::new()
    }
}
