//! frame_diff - compare two still images with the pixel-diff strategy

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use motion_sentry::config::parse_roi;
use motion_sentry::{ClassifierSettings, Frame, MotionStrategy, PixelDiffStrategy};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Previous frame (jpg/png).
    previous: PathBuf,
    /// Current frame (jpg/png).
    current: PathBuf,
    /// Minimum changed fraction to call it motion.
    #[arg(long, default_value_t = 0.05)]
    size_threshold: f32,
    /// Per-channel difference above which a pixel counts as changed.
    #[arg(long, default_value_t = 30)]
    pixel_diff_threshold: u8,
    /// Downsample factor applied to both axes before comparison.
    #[arg(long, default_value_t = 1.0)]
    downsample_factor: f32,
    /// Region of interest as "left,top,right,bottom" (normalized).
    #[arg(long)]
    roi: Option<String>,
}

fn load_frame(path: &PathBuf) -> Result<Frame> {
    let image = image::open(path)
        .with_context(|| format!("decode image {}", path.display()))?
        .to_rgb8();
    Ok(Frame::from(&image))
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let previous = load_frame(&args.previous)?;
    let current = load_frame(&args.current)?;
    let roi = match args.roi.as_deref() {
        Some(value) => parse_roi(value)?,
        None => None,
    };
    let settings = ClassifierSettings {
        size_threshold: args.size_threshold,
        pixel_diff_threshold: args.pixel_diff_threshold,
        downsample_factor: args.downsample_factor,
        ..ClassifierSettings::default()
    }
    .clamped();

    let mut strategy = PixelDiffStrategy::new();
    let comparison = strategy.evaluate(&previous, &current, roi.as_ref(), &settings)?;

    println!(
        "change_ratio={:.6} threshold={} motion={}",
        comparison.change_ratio, settings.size_threshold, comparison.motion_detected
    );
    Ok(if comparison.motion_detected {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
