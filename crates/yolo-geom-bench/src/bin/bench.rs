//! Timing harness for the hot pipeline paths: tile + letterbox, and
//! detection correction. Synthetic frames only; no model, no I/O in the
//! timed region.

use std::time::Instant;

use clap::Parser;
use log::LevelFilter;
use serde::Serialize;
use yolo_geom::pipeline::network_inputs;
use yolo_geom_core::{init_with_level, RgbImage, TargetSize};
use yolo_geom_net::{correct_detections, RawDetectionBox};

#[derive(Parser, Debug)]
#[command(about = "Time letterboxing and detection correction on synthetic frames")]
struct Args {
    /// Frame width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,
    /// Frame height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,
    /// Network input side (square).
    #[arg(long, default_value_t = 416)]
    input: u32,
    /// Tile count (1 or 2).
    #[arg(long, default_value_t = 2)]
    tiles: u32,
    /// Iterations per measurement.
    #[arg(long, default_value_t = 50)]
    iters: u32,
    /// Synthetic detections per tile for the correction measurement.
    #[arg(long, default_value_t = 200)]
    boxes: usize,
    /// Emit the timings as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Timings {
    frame: (u32, u32),
    tiles: u32,
    input: u32,
    iters: u32,
    preprocess_ms_per_frame: f64,
    correct_ms_per_frame: f64,
}

fn gradient_frame(width: u32, height: u32) -> RgbImage {
    let mut frame = RgbImage::filled(width as usize, height as usize, [0, 0, 0]);
    for y in 0..height as usize {
        for x in 0..width as usize {
            frame.put(x, y, [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
    }
    frame
}

fn synthetic_detections(tiles: u32, per_tile: usize) -> Vec<Vec<RawDetectionBox>> {
    (0..tiles)
        .map(|tile| {
            (0..per_tile)
                .map(|i| {
                    let t = (i as f32 + tile as f32 * 0.5) / per_tile as f32;
                    RawDetectionBox {
                        class_label: "object".to_string(),
                        class_index: (i % 80) as u32,
                        x: 0.1 + 0.8 * t,
                        y: 1.0 - (0.1 + 0.8 * t),
                        w: 0.05,
                        h: 0.08,
                    }
                })
                .collect()
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;
    let args = Args::parse();

    let frame = gradient_frame(args.width, args.height);
    let target = TargetSize::square(args.input);

    let started = Instant::now();
    for _ in 0..args.iters {
        let inputs = network_inputs(&frame.view(), args.tiles, target)?;
        std::hint::black_box(inputs);
    }
    let preprocess_ms = started.elapsed().as_secs_f64() * 1e3 / args.iters as f64;

    let raw = synthetic_detections(args.tiles, args.boxes);
    let started = Instant::now();
    for _ in 0..args.iters {
        let boxes =
            correct_detections(args.width, args.height, args.tiles, target, &raw)?;
        std::hint::black_box(boxes);
    }
    let correct_ms = started.elapsed().as_secs_f64() * 1e3 / args.iters as f64;

    let timings = Timings {
        frame: (args.width, args.height),
        tiles: args.tiles,
        input: args.input,
        iters: args.iters,
        preprocess_ms_per_frame: preprocess_ms,
        correct_ms_per_frame: correct_ms,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&timings)?);
    } else {
        println!(
            "{}x{} / {} tile(s) -> {}: preprocess {:.3} ms/frame, correct {:.3} ms/frame",
            args.width, args.height, args.tiles, args.input, preprocess_ms, correct_ms
        );
    }

    Ok(())
}
