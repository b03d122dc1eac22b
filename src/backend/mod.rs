//! Backend abstraction layer
//!
//! Provides the narrow rendering contract the display draws through, plus a
//! recording backend for headless use and a wgpu backend for real output.

pub mod recording;
pub mod traits;
pub mod types;

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

pub use recording::{BackendCommand, RecordingBackend};
pub use traits::*;
pub use types::*;

#[cfg(feature = "wgpu-backend")]
pub use wgpu_backend::WgpuBackend;
