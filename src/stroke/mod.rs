//! Stroke construction
//!
//! A stroke is built from a pending path (`begin` / `draw_to` / `end`) or a
//! single segment, and tessellated into glow-textured triangles appended to
//! the frame's [`CommittedVertices`].

mod path;
mod tessellator;
mod vertices;

pub use path::PendingPath;
pub use tessellator::*;
pub use vertices::*;
