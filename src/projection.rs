//! Fixed display projection
//!
//! Maps display-space pixels (origin top-left, y down) to clip space. Strokes
//! all sit at `STROKE_DEPTH`; the model-view pushes them back so that plane
//! lands inside the clip volume.

use glam::{Mat4, Vec3};

/// Far extent of the orthographic depth range.
const DEPTH_RANGE: f32 = 70001.0;
/// Distance the model-view moves the scene away from the eye.
const EYE_DISTANCE: f32 = 70000.0;

/// Orthographic projection for a `width` x `height` viewport.
#[rustfmt::skip]
pub fn projection_matrix(width: f32, height: f32) -> Mat4 {
    Mat4::from_cols_array(&[
        2.0 / width, 0.0, 0.0, 0.0,
        0.0, -2.0 / height, 0.0, 0.0,
        0.0, 0.0, -2.0 / DEPTH_RANGE, 0.0,
        -1.0, 1.0, -1.0, 1.0,
    ])
}

pub fn model_view_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -EYE_DISTANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::STROKE_DEPTH;
    use glam::Vec4;

    fn to_clip(width: f32, height: f32, x: f32, y: f32) -> Vec4 {
        projection_matrix(width, height) * model_view_matrix() * Vec4::new(x, y, STROKE_DEPTH, 1.0)
    }

    #[test]
    fn test_corners_map_to_clip_edges() {
        let top_left = to_clip(800.0, 600.0, 0.0, 0.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = to_clip(800.0, 600.0, 800.0, 600.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_stroke_plane_inside_depth_range() {
        let clip = to_clip(800.0, 600.0, 400.0, 300.0);
        assert!(clip.z > 0.0 && clip.z < 1.0, "z = {}", clip.z);
        assert_eq!(clip.w, 1.0);
    }
}
