//! demo - end-to-end synthetic run of the motion classifier

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::Parser;

use motion_sentry::config::parse_roi;
use motion_sentry::ingest::files::ImageDirConfig;
use motion_sentry::ingest::synthetic::SyntheticConfig;
use motion_sentry::ingest::{ImageDirSource, SyntheticSource};
use motion_sentry::{
    AlertLogSink, ConfigHandle, FrameHashStrategy, MotionClassifier, MotionEvent,
    NotificationSink, PixelDiffStrategy, SentryConfig, StrategyRegistry,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Duration of the run in seconds. 0 runs until Ctrl-C.
    #[arg(long, default_value_t = 10)]
    seconds: u64,
    /// Frames per second.
    #[arg(long, default_value_t = 10)]
    fps: u32,
    /// Synthetic scene width.
    #[arg(long, default_value_t = 640)]
    width: u32,
    /// Synthetic scene height.
    #[arg(long, default_value_t = 480)]
    height: u32,
    /// Comparison strategy (pixel-diff, frame-hash).
    #[arg(long, default_value = "pixel-diff")]
    strategy: String,
    /// Replay still images from this directory instead of the synthetic scene.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
    /// Region of interest override as "left,top,right,bottom" (normalized).
    #[arg(long, env = "MOTION_ROI")]
    roi: Option<String>,
}

enum Source {
    Synthetic(SyntheticSource),
    Images(ImageDirSource),
}

impl Source {
    fn next_frame(&mut self) -> Result<Option<motion_sentry::Frame>> {
        match self {
            Source::Synthetic(source) => source.next_frame().map(Some),
            Source::Images(source) => source.next_frame(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.fps == 0 {
        return Err(anyhow!("fps must be >= 1"));
    }

    let cfg = SentryConfig::load()?;
    let handle = ConfigHandle::new(cfg.classifier, cfg.roi);
    if let Some(roi) = args.roi.as_deref() {
        handle.set_roi(parse_roi(roi)?)?;
    }

    let mut registry = StrategyRegistry::new();
    registry.register(PixelDiffStrategy::new());
    registry.register(FrameHashStrategy::new());
    let strategy = registry
        .get(&args.strategy)
        .ok_or_else(|| anyhow!("unknown strategy '{}' (have: {:?})", args.strategy, registry.list()))?;

    let mut classifier = MotionClassifier::new(handle, strategy);
    let mut sink = AlertLogSink::new(cfg.notify);

    let mut source = match args.frames_dir {
        Some(dir) => {
            let mut source = ImageDirSource::new(ImageDirConfig { dir });
            source.connect()?;
            Source::Images(source)
        }
        None => {
            let mut source = SyntheticSource::new(SyntheticConfig {
                width: args.width,
                height: args.height,
                ..SyntheticConfig::default()
            });
            source.connect()?;
            Source::Synthetic(source)
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    let started = Instant::now();
    let frame_interval = Duration::from_millis(1000 / args.fps as u64);
    let mut frames = 0u64;
    let mut alerts = 0u64;

    log::info!(
        "demo: strategy={} fps={} duration={}",
        args.strategy,
        args.fps,
        if args.seconds == 0 {
            "until Ctrl-C".to_string()
        } else {
            format!("{}s", args.seconds)
        }
    );

    while running.load(Ordering::SeqCst) {
        if args.seconds > 0 && started.elapsed().as_secs() >= args.seconds {
            break;
        }
        let Some(frame) = source.next_frame()? else {
            log::info!("demo: image sequence exhausted");
            break;
        };
        let now_ms = started.elapsed().as_millis() as i64;
        let decision = classifier.process(frame, now_ms)?;
        frames += 1;
        if decision.should_notify {
            alerts += 1;
            sink.notify(&MotionEvent {
                timestamp_ms: now_ms,
                change_ratio: decision.change_ratio,
            })?;
        }
        std::thread::sleep(frame_interval);
    }

    log::info!("demo: processed {} frames, {} alerts", frames, alerts);
    println!("processed {} frames, {} alerts", frames, alerts);
    Ok(())
}
