//! The vector display
//!
//! [`VectorDisplay`] owns the pen state, the current frame's committed
//! geometry and the frame ring. Geometry calls only touch CPU-side buffers;
//! [`VectorDisplay::update`] is the one place that talks to a backend every
//! frame.

use glam::Vec2;

use crate::backend::{DisplayBackend, FrameUniforms, ProgramHandle, TextureHandle, Vertex};
use crate::error::{ConfigError, DisplayError, DisplayResult};
use crate::frame_ring::{FrameRing, FrameStats};
use crate::projection::{model_view_matrix, projection_matrix};
use crate::resources::GlowTexture;
use crate::shader::ProgramDescriptor;
use crate::stroke::{CommittedVertices, PendingPath, StrokeStyle, StrokeTessellator};
use crate::{
    check_decay, check_initial_decay, check_steps, check_thickness, DisplayConfig, STROKE_ALPHA,
};

/// Target is cleared to opaque black so destination-alpha blending adds up.
const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Backend resources created by [`VectorDisplay::setup`].
#[derive(Debug, Clone, Copy)]
struct GpuResources {
    program: ProgramHandle,
    texture: TextureHandle,
}

/// Phosphor-style vector display
///
/// Per frame the host emits geometry, calls [`update`](Self::update), then
/// [`clear`](Self::clear)s before emitting the next frame.
#[derive(Debug)]
pub struct VectorDisplay {
    config: DisplayConfig,
    path: PendingPath,
    vertices: CommittedVertices,
    ring: FrameRing,
    gpu: Option<GpuResources>,
}

impl VectorDisplay {
    /// Create a display for a `width` x `height` viewport with default settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_valid_config(DisplayConfig::new(width, height))
    }

    /// Create a display from a full configuration.
    pub fn with_config(config: DisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DisplayConfig) -> Self {
        Self {
            ring: FrameRing::new(config.steps),
            config,
            path: PendingPath::new(),
            vertices: CommittedVertices::new(),
            gpu: None,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn ring(&self) -> &FrameRing {
        &self.ring
    }

    pub fn is_set_up(&self) -> bool {
        self.gpu.is_some()
    }

    // Configuration

    /// Change the ring depth. Discards all frame history.
    pub fn set_steps(&mut self, steps: usize) -> Result<(), ConfigError> {
        let steps = check_steps(steps).inspect_err(|e| log::warn!("{e}"))?;
        self.config.steps = steps;
        self.ring.reset(steps);
        log::debug!("frame ring reallocated with {steps} steps");
        Ok(())
    }

    pub fn set_decay(&mut self, decay: f32) -> Result<(), ConfigError> {
        self.config.decay = check_decay(decay).inspect_err(|e| log::warn!("{e}"))?;
        Ok(())
    }

    pub fn set_initial_decay(&mut self, initial_decay: f32) -> Result<(), ConfigError> {
        self.config.initial_decay =
            check_initial_decay(initial_decay).inspect_err(|e| log::warn!("{e}"))?;
        Ok(())
    }

    /// Set the stroke half-width used by subsequently emitted geometry.
    pub fn set_thickness(&mut self, thickness: f32) -> Result<(), ConfigError> {
        self.config.thickness = check_thickness(thickness).inspect_err(|e| log::warn!("{e}"))?;
        Ok(())
    }

    /// Set the color of subsequently emitted geometry.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.config.color = [r, g, b];
    }

    fn style(&self) -> StrokeStyle {
        let [r, g, b] = self.config.color;
        StrokeStyle {
            thickness: self.config.thickness,
            color: [r, g, b, STROKE_ALPHA],
        }
    }

    // Geometry

    /// Committed vertices of the current frame.
    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.as_slice()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.triangle_count()
    }

    /// Drop the current frame's geometry, keeping its allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn is_path_open(&self) -> bool {
        self.path.is_open()
    }

    /// Points submitted to the open path so far.
    pub fn pending_len(&self) -> usize {
        self.path.len()
    }

    /// Start a new path at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if a path is already open. Use [`try_begin_draw`](Self::try_begin_draw)
    /// to get the violation as an error instead.
    #[track_caller]
    pub fn begin_draw(&mut self, x: f32, y: f32) {
        if let Err(e) = self.try_begin_draw(x, y) {
            panic!("{e}");
        }
    }

    /// Start a new path at `(x, y)`, failing if one is already open.
    ///
    /// An `Err` here is a programming error on the caller's side.
    pub fn try_begin_draw(&mut self, x: f32, y: f32) -> DisplayResult<()> {
        if self.path.begin(Vec2::new(x, y)) {
            Ok(())
        } else {
            Err(DisplayError::PathAlreadyOpen)
        }
    }

    pub fn draw_to(&mut self, x: f32, y: f32) {
        self.path.draw_to(Vec2::new(x, y));
    }

    /// Close the open path and tessellate it.
    ///
    /// Paths with fewer than two points produce nothing.
    pub fn end_draw(&mut self) {
        let style = self.style();
        let out = &mut self.vertices;
        self.path
            .finish(|points| StrokeTessellator::new(style, out).path(points));
    }

    /// Draw an isolated segment with caps at both ends.
    pub fn draw(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let style = self.style();
        StrokeTessellator::new(style, &mut self.vertices)
            .segment(Vec2::new(x0, y0), Vec2::new(x1, y1));
    }

    // Backend lifecycle

    /// Create the stroke program, glow texture and slot buffers on `backend`.
    pub fn setup<B: DisplayBackend>(&mut self, backend: &mut B) -> DisplayResult<()> {
        if self.gpu.is_some() {
            log::warn!("vector display is already set up, ignoring setup");
            return Ok(());
        }

        let program = backend.create_program(&ProgramDescriptor::phosphor())?;
        let texture = match backend.upload_texture(&GlowTexture::generate()) {
            Ok(texture) => texture,
            Err(e) => {
                backend.destroy_program(program);
                return Err(e.into());
            }
        };
        self.gpu = Some(GpuResources { program, texture });
        self.ring.ensure_buffers(backend)?;

        log::info!(
            "vector display set up ({}x{}, {} steps)",
            self.config.width,
            self.config.height,
            self.config.steps
        );
        Ok(())
    }

    /// Upload the current frame into the ring and draw the trail.
    ///
    /// The target is cleared first. Committed geometry is left in place; the
    /// host clears it before emitting the next frame.
    pub fn update<B: DisplayBackend>(&mut self, backend: &mut B) -> DisplayResult<FrameStats> {
        let gpu = self.gpu.ok_or(DisplayError::NotSetUp)?;

        let uniforms = FrameUniforms {
            projection: projection_matrix(self.config.width as f32, self.config.height as f32),
            model_view: model_view_matrix(),
            clear_color: CLEAR_COLOR,
        };

        backend.begin_frame(gpu.program, gpu.texture, &uniforms)?;
        let rendered = self.ring.render(
            backend,
            self.vertices.as_slice(),
            self.config.decay,
            self.config.initial_decay,
        );
        // The frame is closed even when rendering failed, so the next update
        // starts from a clean backend state.
        let ended = backend.end_frame();
        let stats = rendered.inspect_err(|e| log::error!("frame render failed: {e}"))?;
        ended?;

        log::trace!(
            "update: {} vertices uploaded, {} draw calls",
            stats.uploaded_vertices,
            stats.draw_calls
        );
        Ok(stats)
    }

    /// Release everything `setup` created. Frame history is discarded.
    pub fn teardown<B: DisplayBackend>(&mut self, backend: &mut B) {
        self.ring.retire_all();
        self.ring.release_retired(backend);
        if let Some(gpu) = self.gpu.take() {
            backend.destroy_texture(gpu.texture);
            backend.destroy_program(gpu.program);
            log::info!("vector display torn down");
        }
    }
}
