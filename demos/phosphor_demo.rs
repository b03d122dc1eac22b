//! Phosphor display demo
//!
//! Renders a spinning polygon with a fading trail, plus a row of isolated
//! segments, for a fixed number of frames. Runs headless; with the wgpu
//! backend the final frame is read back and its lit coverage is logged.
//!
//! ```bash
//! RUST_LOG=info cargo run --example phosphor_demo -- --frames 120 --steps 20
//! ```

use std::f32::consts::TAU;

use clap::Parser;
use phosphor_display::{
    DisplayBackend, DisplayConfig, DisplayError, RecordingBackend, VectorDisplay, WgpuBackend,
};

/// Backend to render with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliBackend {
    /// Offscreen wgpu renderer.
    #[default]
    Wgpu,
    /// Command recorder, no GPU required.
    Recording,
}

/// Phosphor display demo arguments.
#[derive(Parser, Debug)]
#[command(name = "phosphor_demo", about = "Vector display afterglow demo", version)]
struct Args {
    /// Backend to render with.
    #[arg(long, default_value = "wgpu", value_enum)]
    backend: CliBackend,

    /// Target width in pixels.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Target height in pixels.
    #[arg(long, default_value = "480")]
    height: u32,

    /// Number of frames to render.
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Depth of the afterglow trail in frames.
    #[arg(long, default_value = "10")]
    steps: usize,

    /// Decay applied to older frames, in [0, 1).
    #[arg(long, default_value = "0.8")]
    decay: f32,

    /// Stroke half-width.
    #[arg(long, default_value = "6.0")]
    thickness: f32,

    /// Sides of the spinning polygon.
    #[arg(long, default_value = "5")]
    sides: usize,
}

fn emit_frame(display: &mut VectorDisplay, args: &Args, frame: u32) {
    let (w, h) = (args.width as f32, args.height as f32);
    let center = (w / 2.0, h / 2.0);
    let radius = w.min(h) * 0.3;
    let spin = frame as f32 * 0.05;

    display.set_color(0.3, 1.0, 0.4);
    let point = |i: usize| {
        let a = spin + i as f32 / args.sides as f32 * TAU;
        (center.0 + radius * a.cos(), center.1 + radius * a.sin())
    };
    let (x0, y0) = point(0);
    display.begin_draw(x0, y0);
    for i in 1..args.sides {
        let (x, y) = point(i);
        display.draw_to(x, y);
    }
    display.draw_to(x0, y0);
    display.end_draw();

    display.set_color(1.0, 0.8, 0.2);
    let y = h * 0.9;
    for i in 0..8 {
        let x = w * (0.1 + i as f32 * 0.1);
        let lift = ((frame + i * 4) as f32 * 0.2).sin() * 10.0;
        display.draw(x, y, x + w * 0.05, y - 20.0 - lift);
    }
}

fn run<B: DisplayBackend>(
    display: &mut VectorDisplay,
    backend: &mut B,
    args: &Args,
) -> Result<(), DisplayError> {
    display.setup(backend)?;
    for frame in 0..args.frames {
        emit_frame(display, args, frame);
        let stats = display.update(backend)?;
        log::debug!(
            "frame {frame}: {} triangles, {} draw calls",
            display.triangle_count(),
            stats.draw_calls
        );
        display.clear();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = DisplayConfig::new(args.width, args.height)
        .with_steps(args.steps)
        .with_decay(args.decay)
        .with_thickness(args.thickness);
    let mut display = VectorDisplay::with_config(config)?;

    match args.backend {
        CliBackend::Wgpu => {
            let mut backend = WgpuBackend::new_headless(args.width, args.height)?;
            run(&mut display, &mut backend, &args)?;

            let pixels = backend.read_pixels()?;
            let lit = pixels.chunks_exact(4).filter(|p| p[..3].iter().any(|&c| c > 0)).count();
            let total = (args.width * args.height) as f32;
            log::info!(
                "rendered {} frames on {}, {:.1}% of pixels lit",
                backend.frames_submitted(),
                backend.adapter_info().name,
                lit as f32 / total * 100.0
            );
            display.teardown(&mut backend);
        }
        CliBackend::Recording => {
            let mut backend = RecordingBackend::new();
            run(&mut display, &mut backend, &args)?;
            log::info!(
                "recorded {} frames, {} commands",
                backend.frames(),
                backend.commands().len()
            );
            display.teardown(&mut backend);
        }
    }

    Ok(())
}
