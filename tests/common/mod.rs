//! Shared helpers for the integration tests.

#![allow(dead_code)]

use phosphor_display::{RecordingBackend, VectorDisplay};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A display that has been set up on a fresh recording backend.
pub fn recording_display(width: u32, height: u32) -> (VectorDisplay, RecordingBackend) {
    init_logger();
    let mut backend = RecordingBackend::new();
    let mut display = VectorDisplay::new(width, height);
    display
        .setup(&mut backend)
        .expect("recording backend setup cannot fail");
    (display, backend)
}

/// Emit an open right-angle corner: (0,0) -> (10,0) -> (10,10).
pub fn draw_corner(display: &mut VectorDisplay) {
    display.begin_draw(0.0, 0.0);
    display.draw_to(10.0, 0.0);
    display.draw_to(10.0, 10.0);
    display.end_draw();
}

/// Emit a closed regular polygon around `(cx, cy)`.
pub fn draw_polygon(display: &mut VectorDisplay, cx: f32, cy: f32, radius: f32, sides: usize) {
    let point = |i: usize| {
        let a = i as f32 / sides as f32 * std::f32::consts::TAU;
        (cx + radius * a.cos(), cy + radius * a.sin())
    };
    let (x, y) = point(0);
    display.begin_draw(x, y);
    for i in 1..sides {
        let (x, y) = point(i);
        display.draw_to(x, y);
    }
    display.draw_to(x, y);
    display.end_draw();
}

pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{a} != {b}");
}
