use std::{env, fs, path::PathBuf};

use image::ImageReader;
use serde::{Deserialize, Serialize};
use yolo_geom::core::TargetSize;
use yolo_geom::net::ModelGeometry;
use yolo_geom::pipeline::{network_inputs, rgb_view, to_image};

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use yolo_geom::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use yolo_geom::core::init_with_level;

fn default_input_side() -> u32 {
    416
}

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    image_path: String,
    model_config_path: String,
    #[serde(default)]
    output_dir: Option<String>,
    #[serde(default = "default_input_side")]
    input_side: u32,
}

#[derive(Debug, Serialize)]
struct ExampleReport {
    image_path: String,
    config_path: String,
    tiles: u32,
    target: TargetSize,
    anchor_count: usize,
    output_layers: usize,
    inputs: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Info)?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = load_config(&config_path)?;

    let model = ModelGeometry::load_json(&cfg.model_config_path)?;
    info!(
        "model geometry: {} anchors, {} output layers, {} tile(s)",
        model.anchors().len(),
        model.output_count(),
        model.tiles()
    );

    let img = ImageReader::open(&cfg.image_path)?.decode()?.to_rgb8();
    info!("frame: {}x{}", img.width(), img.height());

    let target = TargetSize::square(cfg.input_side);
    let inputs = network_inputs(&rgb_view(&img), model.tiles(), target)?;

    let out_dir = cfg
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmpdata"));
    fs::create_dir_all(&out_dir)?;

    let mut written = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        let path = out_dir.join(format!("network_input_{index}.png"));
        to_image(input)
            .ok_or("network input buffer does not match its dimensions")?
            .save(&path)?;
        info!("wrote {}", path.display());
        written.push(path.to_string_lossy().into_owned());
    }

    let report = ExampleReport {
        image_path: cfg.image_path.clone(),
        config_path: config_path.to_string_lossy().into_owned(),
        tiles: model.tiles(),
        target,
        anchor_count: model.anchors().len(),
        output_layers: model.output_count(),
        inputs: written,
    };
    write_report(&out_dir, report)
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/preprocess_config.json"))
}

fn load_config(path: &PathBuf) -> Result<ExampleConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_report(
    out_dir: &PathBuf,
    report: ExampleReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = out_dir.join("preprocess_report.json");
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&out_path, json)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}
