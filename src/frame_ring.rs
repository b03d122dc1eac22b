//! Frame ring and decay law
//!
//! The ring keeps the last `steps` frames of geometry, one vertex buffer per
//! slot. Each update advances the write cursor, uploads the current frame into
//! that slot, then draws every slot from oldest to newest with an alpha that
//! falls off with the slot's age.

use crate::backend::{BackendError, BackendResult, BufferHandle, DisplayBackend, Vertex};

/// Blend alpha for a slot `age` frames behind the newest one.
///
/// The newest frame is drawn at full strength, the previous one at
/// `initial_decay`, and older ones decay geometrically from there:
/// `decay^(age - 1) * initial_decay`.
pub fn decay_alpha(age: usize, decay: f32, initial_decay: f32) -> f32 {
    match age {
        0 => 1.0,
        1 => initial_decay,
        _ => (decay as f64).powi((age - 1) as i32) as f32 * initial_decay,
    }
}

/// Vertex count of a slot as a draw-call count.
pub fn vertex_count(len: usize) -> BackendResult<u32> {
    u32::try_from(len).map_err(|_| BackendError::VertexCountOverflow(len))
}

/// One slot of the ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSlot {
    /// Backend buffer; allocated at setup, or on first write after a reset.
    pub buffer: Option<BufferHandle>,
    /// Vertices uploaded into this slot; zero slots are skipped when drawing.
    pub vertex_count: u32,
}

/// What a single ring update did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Slot written this update, `None` when the ring has no slots.
    pub slot: Option<usize>,
    pub uploaded_vertices: u32,
    pub draw_calls: u32,
}

/// Fixed-depth circular buffer of per-frame geometry.
#[derive(Debug)]
pub struct FrameRing {
    slots: Vec<FrameSlot>,
    cursor: usize,
    /// Buffers dropped by a reset, destroyed on the next backend access.
    retired: Vec<BufferHandle>,
}

impl FrameRing {
    pub fn new(steps: usize) -> Self {
        Self {
            slots: vec![FrameSlot::default(); steps],
            cursor: 0,
            retired: Vec::new(),
        }
    }

    pub fn steps(&self) -> usize {
        self.slots.len()
    }

    /// Index of the most recently written slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slots(&self) -> &[FrameSlot] {
        &self.slots
    }

    pub fn retired(&self) -> &[BufferHandle] {
        &self.retired
    }

    /// Reallocate the ring with `steps` empty slots, discarding all history.
    pub fn reset(&mut self, steps: usize) {
        self.retire_all();
        self.slots = vec![FrameSlot::default(); steps];
        self.cursor = 0;
    }

    /// Move every slot buffer to the retired list and zero all counts.
    pub fn retire_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(buffer) = slot.buffer.take() {
                self.retired.push(buffer);
            }
            slot.vertex_count = 0;
        }
    }

    /// Slot indices and ages in draw order, oldest first.
    pub fn draw_order(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let steps = self.slots.len();
        (0..steps).map(move |n| {
            let age = steps - n - 1;
            ((self.cursor + steps - age) % steps, age)
        })
    }

    /// Destroy retired buffers.
    pub fn release_retired<B: DisplayBackend>(&mut self, backend: &mut B) {
        for buffer in self.retired.drain(..) {
            backend.destroy_buffer(buffer);
        }
    }

    /// Allocate buffers for slots that have none.
    pub fn ensure_buffers<B: DisplayBackend>(&mut self, backend: &mut B) -> BackendResult<()> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.buffer.is_none() {
                slot.buffer = Some(backend.create_vertex_buffer(&format!("frame_slot_{index}"))?);
            }
        }
        Ok(())
    }

    /// Advance, upload `vertices` into the new current slot, and draw all slots.
    ///
    /// Must be called inside a backend frame.
    pub fn render<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        vertices: &[Vertex],
        decay: f32,
        initial_decay: f32,
    ) -> BackendResult<FrameStats> {
        self.release_retired(backend);

        let steps = self.slots.len();
        if steps == 0 {
            return Ok(FrameStats::default());
        }

        let count = vertex_count(vertices.len())?;
        self.cursor = (self.cursor + 1) % steps;
        let slot = &mut self.slots[self.cursor];
        let buffer = match slot.buffer {
            Some(buffer) => buffer,
            None => {
                let buffer =
                    backend.create_vertex_buffer(&format!("frame_slot_{}", self.cursor))?;
                slot.buffer = Some(buffer);
                buffer
            }
        };
        if !vertices.is_empty() {
            backend.upload_vertex_buffer(buffer, vertices)?;
        }
        slot.vertex_count = count;
        log::trace!(
            "frame ring: wrote {} vertices into slot {}",
            slot.vertex_count,
            self.cursor
        );

        let mut stats = FrameStats {
            slot: Some(self.cursor),
            uploaded_vertices: count,
            draw_calls: 0,
        };

        let order: Vec<(usize, usize)> = self.draw_order().collect();
        for (index, age) in order {
            let FrameSlot {
                buffer,
                vertex_count,
            } = self.slots[index];
            let Some(buffer) = buffer else {
                continue;
            };
            if vertex_count == 0 {
                continue;
            }
            let alpha = decay_alpha(age, decay, initial_decay);
            backend.draw_triangles(buffer, vertex_count, alpha)?;
            stats.draw_calls += 1;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_decay_law_defaults() {
        let alphas: Vec<f32> = (0..4).map(|k| decay_alpha(k, 0.8, 0.04)).collect();
        assert_close(alphas[0], 1.0);
        assert_close(alphas[1], 0.04);
        assert_close(alphas[2], 0.032);
        assert_close(alphas[3], 0.0256);
    }

    #[test]
    fn test_decay_law_zero_decay() {
        assert_close(decay_alpha(1, 0.0, 0.5), 0.5);
        assert_close(decay_alpha(2, 0.0, 0.5), 0.0);
    }

    #[test]
    fn test_draw_order_oldest_first() {
        let mut ring = FrameRing::new(4);
        ring.cursor = 1;
        let order: Vec<_> = ring.draw_order().collect();
        assert_eq!(order, vec![(2, 3), (3, 2), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_reset_retires_buffers() {
        let mut ring = FrameRing::new(2);
        ring.slots[0].buffer = Some(BufferHandle(7));
        ring.slots[0].vertex_count = 3;
        ring.cursor = 1;
        ring.reset(5);
        assert_eq!(ring.steps(), 5);
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.retired(), &[BufferHandle(7)]);
        assert!(ring.slots().iter().all(|s| *s == FrameSlot::default()));
    }

    #[test]
    fn test_vertex_count_conversion() {
        assert_eq!(vertex_count(0).unwrap(), 0);
        assert_eq!(vertex_count(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_vertex_count_overflow_is_an_error() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            vertex_count(len),
            Err(BackendError::VertexCountOverflow(n)) if n == len
        ));
    }

    #[test]
    fn test_empty_ring_draw_order() {
        let ring = FrameRing::new(0);
        assert_eq!(ring.draw_order().count(), 0);
    }
}
