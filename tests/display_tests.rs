//! Integration tests for the vector display.
//!
//! Everything here runs against the [`RecordingBackend`], so no GPU is needed.
//!
//! ```bash
//! cargo test --test display_tests
//! ```

mod common;

use rstest::rstest;

use common::{assert_close, draw_corner, draw_polygon, init_logger, recording_display};
use phosphor_display::stroke::{CommittedVertices, PendingPath};
use phosphor_display::{
    decay_alpha, BackendCommand, ConfigError, DisplayConfig, VectorDisplay, MAX_STEPS,
};

// ============================================================================
// Decay law
// ============================================================================

#[rstest]
#[case::newest(0, 1.0)]
#[case::previous(1, 0.04)]
#[case::two_back(2, 0.032)]
#[case::three_back(3, 0.0256)]
fn test_decay_law(#[case] age: usize, #[case] expected: f32) {
    assert_close(decay_alpha(age, 0.8, 0.04), expected);
}

/// Draw alphas come out oldest first and follow the decay law.
#[test]
fn test_update_draws_with_decayed_alphas() {
    let (mut display, mut backend) = recording_display(100, 100);

    for _ in 0..4 {
        display.draw(10.0, 10.0, 90.0, 10.0);
        display.update(&mut backend).unwrap();
        display.clear();
        backend.take_commands();
    }

    display.draw(10.0, 10.0, 90.0, 10.0);
    display.update(&mut backend).unwrap();

    let alphas: Vec<f32> = backend.draws().iter().map(|d| d.2).collect();
    assert_eq!(alphas.len(), 5);
    let expected = [0.02048, 0.0256, 0.032, 0.04, 1.0];
    for (alpha, expected) in alphas.iter().zip(expected) {
        assert_close(*alpha, expected);
    }
}

#[test]
fn test_ring_wraps_after_steps_updates() {
    let (mut display, mut backend) = recording_display(100, 100);
    display.set_steps(3).unwrap();

    for _ in 0..7 {
        display.draw(0.0, 0.0, 10.0, 10.0);
        display.update(&mut backend).unwrap();
        display.clear();
    }

    backend.take_commands();
    display.draw(0.0, 0.0, 10.0, 10.0);
    let stats = display.update(&mut backend).unwrap();
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(stats.slot, Some(8 % 3));
}

// ============================================================================
// Frame ring
// ============================================================================

#[test]
fn test_empty_frame_slot_is_skipped() {
    let (mut display, mut backend) = recording_display(100, 100);

    draw_corner(&mut display);
    display.update(&mut backend).unwrap();
    display.clear();
    backend.take_commands();

    let stats = display.update(&mut backend).unwrap();
    assert_eq!(stats.uploaded_vertices, 0);
    assert_eq!(stats.draw_calls, 1);

    let draws = backend.draws();
    assert_eq!(draws.len(), 1);
    assert_close(draws[0].2, 0.04);
    assert!(!backend
        .commands()
        .iter()
        .any(|c| matches!(c, BackendCommand::Upload { .. })));
}

#[test]
fn test_upload_matches_committed_vertices() {
    let (mut display, mut backend) = recording_display(100, 100);
    draw_corner(&mut display);
    display.update(&mut backend).unwrap();

    let (buffer, count, _) = *backend.draws().last().unwrap();
    assert_eq!(count as usize, display.vertices().len());
    assert_eq!(backend.buffer_contents(buffer).unwrap(), display.vertices());
}

#[test]
fn test_set_steps_discards_history() {
    let (mut display, mut backend) = recording_display(100, 100);
    display.set_steps(3).unwrap();
    for _ in 0..3 {
        display.draw(0.0, 0.0, 50.0, 50.0);
        display.update(&mut backend).unwrap();
        display.clear();
    }

    display.set_steps(5).unwrap();
    assert_eq!(display.ring().steps(), 5);
    assert_eq!(display.ring().cursor(), 0);
    backend.take_commands();

    let stats = display.update(&mut backend).unwrap();
    assert_eq!(stats.draw_calls, 0);
    assert_eq!(stats.slot, Some(1));

    let commands = backend.commands();
    let destroyed = commands
        .iter()
        .filter(|c| matches!(c, BackendCommand::DestroyBuffer(_)))
        .count();
    let created = commands
        .iter()
        .filter(|c| matches!(c, BackendCommand::CreateBuffer(_)))
        .count();
    assert_eq!(destroyed, 3);
    assert_eq!(created, 1);
}

#[test]
fn test_zero_steps_only_clears() {
    let (mut display, mut backend) = recording_display(100, 100);
    display.set_steps(0).unwrap();
    draw_corner(&mut display);
    backend.take_commands();

    let stats = display.update(&mut backend).unwrap();
    assert_eq!(stats.slot, None);
    assert!(backend.draws().is_empty());
    assert!(matches!(
        backend.commands().first(),
        Some(BackendCommand::BeginFrame { .. })
    ));
    assert_eq!(backend.commands().last(), Some(&BackendCommand::EndFrame));
}

// ============================================================================
// Tessellation through the display
// ============================================================================

#[test]
fn test_open_corner_has_twelve_triangles() {
    init_logger();
    let mut display = VectorDisplay::new(100, 100);
    draw_corner(&mut display);
    assert_eq!(display.triangle_count(), 12);
}

#[rstest]
#[case::triangle(3)]
#[case::square(4)]
#[case::hexagon(6)]
fn test_closed_polygon_has_fan_per_vertex(#[case] sides: usize) {
    let mut display = VectorDisplay::new(400, 400);
    display.set_thickness(4.0).unwrap();
    draw_polygon(&mut display, 200.0, 200.0, 100.0, sides);
    // one body and one fan per side, no caps
    assert_eq!(display.triangle_count(), sides * 6);
}

#[rstest]
#[case(1.0)]
#[case(4.5)]
#[case(80.0)]
fn test_segment_edges_sit_at_thickness(#[case] thickness: f32) {
    let mut display = VectorDisplay::new(400, 400);
    display.set_thickness(thickness).unwrap();
    display.draw(100.0, 200.0, 300.0, 200.0);

    assert_eq!(display.triangle_count(), 8);
    let edges: Vec<_> = display
        .vertices()
        .iter()
        .filter(|v| v.tex_coord[1] == 0.5 && v.tex_coord[0] != 0.5)
        .collect();
    assert!(!edges.is_empty());
    for v in edges {
        let distance = (v.position[1] - 200.5).abs();
        assert!(
            (distance - thickness).abs() < 1e-3,
            "edge at {distance}, expected {thickness}"
        );
    }
}

#[test]
fn test_retessellation_is_bit_identical() {
    let mut display = VectorDisplay::new(100, 100);
    display.set_color(0.2, 0.7, 0.9);
    draw_polygon(&mut display, 50.0, 50.0, 30.0, 5);
    draw_corner(&mut display);
    let first: Vec<u8> = bytemuck::cast_slice(display.vertices()).to_vec();

    display.clear();
    draw_polygon(&mut display, 50.0, 50.0, 30.0, 5);
    draw_corner(&mut display);
    let second: &[u8] = bytemuck::cast_slice(display.vertices());

    assert_eq!(first.as_slice(), second);
}

#[test]
fn test_clear_keeps_capacity() {
    let mut display = VectorDisplay::new(100, 100);
    for i in 0..20 {
        display.draw(0.0, i as f32, 50.0, i as f32);
    }
    assert_eq!(display.vertices().len(), 20 * 24);
    display.clear();
    assert!(display.vertices().is_empty());
}

// ============================================================================
// Growable buffers
// ============================================================================

#[test]
fn test_pending_path_growth_keeps_points() {
    let mut path = PendingPath::new();
    let n = path.capacity() * 2;
    assert!(path.begin(glam::Vec2::new(0.0, 0.0)));
    for i in 1..n {
        path.draw_to(glam::Vec2::new(i as f32, -(i as f32)));
    }
    assert_eq!(path.len(), n);
    for (i, p) in path.points().iter().enumerate() {
        assert_eq!(*p, glam::Vec2::new(i as f32, -(i as f32)));
    }
}

#[test]
fn test_committed_vertices_growth_keeps_data() {
    let mut vertices = CommittedVertices::new();
    let n = vertices.capacity() * 2;
    for i in 0..n {
        vertices.push_tex_point(i as f64, 0.0, 0.0, 0.0, [1.0; 4]);
    }
    assert_eq!(vertices.len(), n);
    for (i, v) in vertices.as_slice().iter().enumerate() {
        assert_eq!(v.position[0], i as f32 + 0.5);
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_rejected_decay_keeps_previous_value() {
    let mut display = VectorDisplay::new(100, 100);
    display.set_decay(0.8).unwrap();
    assert_eq!(display.set_decay(1.5), Err(ConfigError::InvalidDecay(1.5)));
    assert_eq!(display.config().decay, 0.8);
}

#[rstest]
#[case::too_deep(MAX_STEPS + 1)]
#[case::far_too_deep(10_000)]
fn test_rejected_steps_keep_ring(#[case] steps: usize) {
    let mut display = VectorDisplay::new(100, 100);
    assert_eq!(display.set_steps(steps), Err(ConfigError::InvalidSteps(steps)));
    assert_eq!(display.ring().steps(), 10);
}

#[test]
fn test_with_config_validates() {
    let config = DisplayConfig::new(100, 100).with_initial_decay(1.0);
    assert!(matches!(
        VectorDisplay::with_config(config),
        Err(ConfigError::InvalidInitialDecay(_))
    ));

    let config = DisplayConfig::new(100, 100).with_steps(4).with_thickness(2.0);
    let display = VectorDisplay::with_config(config).unwrap();
    assert_eq!(display.ring().steps(), 4);
}

// ============================================================================
// Protocol
// ============================================================================

#[test]
#[should_panic(expected = "already open")]
fn test_begin_while_open_panics() {
    let mut display = VectorDisplay::new(100, 100);
    display.begin_draw(0.0, 0.0);
    display.draw_to(1.0, 1.0);
    display.begin_draw(2.0, 2.0);
}

#[test]
fn test_end_draw_allows_next_path() {
    let mut display = VectorDisplay::new(100, 100);
    display.begin_draw(0.0, 0.0);
    display.draw_to(1.0, 1.0);
    display.end_draw();
    assert!(!display.is_path_open());
    display.begin_draw(2.0, 2.0);
    assert_eq!(display.pending_len(), 1);
}
