//! Resource generation
//!
//! Holds the procedurally generated glow texture sampled by every stroke.

mod glow_texture;

pub use glow_texture::*;
