//! Phosphor Display - persistent glowing vector strokes with a fading trail
//!
//! Strokes are submitted either as polylines through a begin / draw-to / end
//! pen protocol or as isolated segments. Each stroke is tessellated into
//! glow-textured triangles with rounded joints and square caps, and the last
//! few frames are composited with decaying opacity to mimic the afterglow of
//! a vector-scan CRT.
//!
//! # Features
//! - Stroke tessellation with corner fans and end caps
//! - Closed-path detection
//! - Frame ring with a two-stage decay law
//! - Backend abstraction with a recording backend and an offscreen wgpu backend
//!
//! # Example
//! ```
//! use phosphor_display::{RecordingBackend, VectorDisplay};
//!
//! let mut backend = RecordingBackend::new();
//! let mut display = VectorDisplay::new(640, 480);
//! display.setup(&mut backend).unwrap();
//!
//! display.begin_draw(10.0, 10.0);
//! display.draw_to(100.0, 10.0);
//! display.draw_to(100.0, 100.0);
//! display.end_draw();
//!
//! let stats = display.update(&mut backend).unwrap();
//! assert_eq!(stats.draw_calls, 1);
//! display.clear();
//! ```

pub mod backend;
pub mod display;
pub mod error;
pub mod frame_ring;
pub mod projection;
pub mod resources;
pub mod shader;
pub mod stroke;

pub use backend::{
    BackendCommand, BackendError, BackendResult, DisplayBackend, RecordingBackend, Vertex,
};
#[cfg(feature = "wgpu-backend")]
pub use backend::WgpuBackend;
pub use display::VectorDisplay;
pub use error::{ConfigError, DisplayError, DisplayResult};
pub use frame_ring::{decay_alpha, FrameRing, FrameStats};
pub use resources::{GlowTexture, TEXTURE_SIZE};
pub use stroke::{CLOSED_PATH_EPSILON, CORNER_RADIUS, STROKE_DEPTH};

/// Deepest frame ring accepted by the configuration.
pub const MAX_STEPS: usize = 300;
pub const DEFAULT_STEPS: usize = 10;
pub const DEFAULT_DECAY: f32 = 0.8;
pub const DEFAULT_INITIAL_DECAY: f32 = 0.04;
pub const DEFAULT_THICKNESS: f32 = 80.0;
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Alpha baked into every stroke vertex.
pub const STROKE_ALPHA: f32 = 1.0;

/// Display configuration
///
/// `width` and `height` only feed the projection. Everything else can also be
/// changed later through the setters on [`VectorDisplay`], which apply the
/// same range checks as [`DisplayConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Number of frames kept in the ring.
    pub steps: usize,
    /// Geometric falloff applied from the third-newest frame on.
    pub decay: f32,
    /// Alpha of the frame directly behind the newest one.
    pub initial_decay: f32,
    /// Stroke half-width in display units.
    pub thickness: f32,
    pub color: [f32; 3],
}

impl DisplayConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            steps: DEFAULT_STEPS,
            decay: DEFAULT_DECAY,
            initial_decay: DEFAULT_INITIAL_DECAY,
            thickness: DEFAULT_THICKNESS,
            color: DEFAULT_COLOR,
        }
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_initial_decay(mut self, initial_decay: f32) -> Self {
        self.initial_decay = initial_decay;
        self
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b];
        self
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_steps(self.steps)?;
        check_decay(self.decay)?;
        check_initial_decay(self.initial_decay)?;
        check_thickness(self.thickness)?;
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

pub(crate) fn check_steps(steps: usize) -> Result<usize, ConfigError> {
    if steps <= MAX_STEPS {
        Ok(steps)
    } else {
        Err(ConfigError::InvalidSteps(steps))
    }
}

// NaN fails every range check below.

pub(crate) fn check_decay(decay: f32) -> Result<f32, ConfigError> {
    if (0.0..1.0).contains(&decay) {
        Ok(decay)
    } else {
        Err(ConfigError::InvalidDecay(decay))
    }
}

pub(crate) fn check_initial_decay(initial_decay: f32) -> Result<f32, ConfigError> {
    if (0.0..1.0).contains(&initial_decay) {
        Ok(initial_decay)
    } else {
        Err(ConfigError::InvalidInitialDecay(initial_decay))
    }
}

pub(crate) fn check_thickness(thickness: f32) -> Result<f32, ConfigError> {
    if thickness > 0.0 {
        Ok(thickness)
    } else {
        Err(ConfigError::InvalidThickness(thickness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DisplayConfig::new(640, 480);
        assert_eq!(config.steps, 10);
        assert_eq!(config.decay, 0.8);
        assert_eq!(config.initial_decay, 0.04);
        assert_eq!(config.thickness, 80.0);
        assert_eq!(config.color, [1.0, 1.0, 1.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = DisplayConfig::default();
        assert_eq!(
            base.with_steps(301).validate(),
            Err(ConfigError::InvalidSteps(301))
        );
        assert_eq!(
            base.with_decay(1.0).validate(),
            Err(ConfigError::InvalidDecay(1.0))
        );
        assert_eq!(
            base.with_initial_decay(-0.1).validate(),
            Err(ConfigError::InvalidInitialDecay(-0.1))
        );
        assert_eq!(
            base.with_thickness(0.0).validate(),
            Err(ConfigError::InvalidThickness(0.0))
        );
    }

    #[test]
    fn test_range_bounds() {
        assert!(check_steps(0).is_ok());
        assert!(check_steps(MAX_STEPS).is_ok());
        assert!(check_decay(0.0).is_ok());
        assert!(check_decay(0.999).is_ok());
        assert!(check_decay(f32::NAN).is_err());
        assert!(check_thickness(f32::MIN_POSITIVE).is_ok());
        assert!(check_thickness(-1.0).is_err());
    }
}
