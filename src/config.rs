//! Runtime configuration.
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. An optional JSON config file addressed by `MOTION_CONFIG`
//! 3. `MOTION_*` environment variable overrides
//!
//! Loaded values are clamped into their valid domains rather than rejected;
//! a monitoring process should come up with sane settings even when the
//! persisted ones drifted out of range.
//!
//! `ConfigHandle` is the thread-safe hand-off between a settings surface
//! (UI thread) and the capture pipeline driving the classifier.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::roi::RegionOfInterest;

const DEFAULT_SIZE_THRESHOLD: f32 = 0.05;
const DEFAULT_SPEED_THRESHOLD_MS: i64 = 500;
const DEFAULT_PIXEL_DIFF_THRESHOLD: u8 = 30;
const DEFAULT_DOWNSAMPLE_FACTOR: f32 = 0.25;
const DEFAULT_SOUND_VOLUME: f32 = 0.8;

#[derive(Debug, Deserialize, Default)]
struct SentryConfigFile {
    classifier: Option<ClassifierConfigFile>,
    notify: Option<NotifyConfigFile>,
    roi: Option<RoiConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ClassifierConfigFile {
    size_threshold: Option<f32>,
    speed_threshold_ms: Option<i64>,
    pixel_diff_threshold: Option<u8>,
    downsample_factor: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct NotifyConfigFile {
    sound_enabled: Option<bool>,
    sound_volume: Option<f32>,
    vibration_enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct RoiConfigFile {
    enabled: Option<bool>,
    left: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
}

/// Classifier tuning knobs. All fields take effect on the next processed
/// frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierSettings {
    /// Minimum fraction of changed pixels to call a frame "motion", `[0,1]`.
    pub size_threshold: f32,
    /// Minimum milliseconds between two consecutive notifications.
    pub speed_threshold_ms: i64,
    /// Per-channel difference above which a pixel counts as changed.
    pub pixel_diff_threshold: u8,
    /// Fraction applied to both axes before comparison, `(0,1]`.
    pub downsample_factor: f32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            size_threshold: DEFAULT_SIZE_THRESHOLD,
            speed_threshold_ms: DEFAULT_SPEED_THRESHOLD_MS,
            pixel_diff_threshold: DEFAULT_PIXEL_DIFF_THRESHOLD,
            downsample_factor: DEFAULT_DOWNSAMPLE_FACTOR,
        }
    }
}

impl ClassifierSettings {
    /// Bring every field back into its valid domain.
    pub fn clamped(mut self) -> Self {
        if self.size_threshold.is_nan() {
            self.size_threshold = DEFAULT_SIZE_THRESHOLD;
        }
        self.size_threshold = self.size_threshold.clamp(0.0, 1.0);
        self.speed_threshold_ms = self.speed_threshold_ms.max(0);
        if !(self.downsample_factor > 0.0) {
            self.downsample_factor = DEFAULT_DOWNSAMPLE_FACTOR;
        }
        self.downsample_factor = self.downsample_factor.min(1.0);
        self
    }
}

/// Notification sink preferences. External-collaborator configuration; the
/// classifier itself never reads these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotifySettings {
    pub sound_enabled: bool,
    /// Playback volume, `[0,1]`.
    pub sound_volume: f32,
    pub vibration_enabled: bool,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sound_volume: DEFAULT_SOUND_VOLUME,
            vibration_enabled: true,
        }
    }
}

impl NotifySettings {
    pub fn clamped(mut self) -> Self {
        if self.sound_volume.is_nan() {
            self.sound_volume = DEFAULT_SOUND_VOLUME;
        }
        self.sound_volume = self.sound_volume.clamp(0.0, 1.0);
        self
    }
}

/// Fully resolved process configuration.
#[derive(Clone, Debug)]
pub struct SentryConfig {
    pub classifier: ClassifierSettings,
    pub notify: NotifySettings,
    pub roi: Option<RegionOfInterest>,
}

impl SentryConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("MOTION_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate();
        Ok(cfg)
    }

    fn from_file(file: SentryConfigFile) -> Self {
        let defaults = ClassifierSettings::default();
        let classifier_file = file.classifier.unwrap_or_default();
        let classifier = ClassifierSettings {
            size_threshold: classifier_file
                .size_threshold
                .unwrap_or(defaults.size_threshold),
            speed_threshold_ms: classifier_file
                .speed_threshold_ms
                .unwrap_or(defaults.speed_threshold_ms),
            pixel_diff_threshold: classifier_file
                .pixel_diff_threshold
                .unwrap_or(defaults.pixel_diff_threshold),
            downsample_factor: classifier_file
                .downsample_factor
                .unwrap_or(defaults.downsample_factor),
        };

        let notify_defaults = NotifySettings::default();
        let notify_file = file.notify.unwrap_or_default();
        let notify = NotifySettings {
            sound_enabled: notify_file
                .sound_enabled
                .unwrap_or(notify_defaults.sound_enabled),
            sound_volume: notify_file
                .sound_volume
                .unwrap_or(notify_defaults.sound_volume),
            vibration_enabled: notify_file
                .vibration_enabled
                .unwrap_or(notify_defaults.vibration_enabled),
        };

        let roi = file.roi.and_then(|roi| {
            if roi.enabled.unwrap_or(false) {
                Some(RegionOfInterest::new(
                    roi.left.unwrap_or(0.0),
                    roi.top.unwrap_or(0.0),
                    roi.right.unwrap_or(1.0),
                    roi.bottom.unwrap_or(1.0),
                ))
            } else {
                None
            }
        });

        Self {
            classifier,
            notify,
            roi,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("MOTION_SIZE_THRESHOLD") {
            self.classifier.size_threshold = parse_env("MOTION_SIZE_THRESHOLD", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_SPEED_THRESHOLD_MS") {
            self.classifier.speed_threshold_ms = parse_env("MOTION_SPEED_THRESHOLD_MS", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_PIXEL_DIFF_THRESHOLD") {
            self.classifier.pixel_diff_threshold = parse_env("MOTION_PIXEL_DIFF_THRESHOLD", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_DOWNSAMPLE_FACTOR") {
            self.classifier.downsample_factor = parse_env("MOTION_DOWNSAMPLE_FACTOR", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_ROI") {
            self.roi = parse_roi(&value)?;
        }
        if let Ok(value) = std::env::var("MOTION_SOUND_ENABLED") {
            self.notify.sound_enabled = parse_env("MOTION_SOUND_ENABLED", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_SOUND_VOLUME") {
            self.notify.sound_volume = parse_env("MOTION_SOUND_VOLUME", &value)?;
        }
        if let Ok(value) = std::env::var("MOTION_VIBRATION_ENABLED") {
            self.notify.vibration_enabled = parse_env("MOTION_VIBRATION_ENABLED", &value)?;
        }
        Ok(())
    }

    fn validate(&mut self) {
        self.classifier = self.classifier.clamped();
        self.notify = self.notify.clamped();
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierSettings::default(),
            notify: NotifySettings::default(),
            roi: None,
        }
    }
}

fn read_config_file(path: &Path) -> Result<SentryConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("{} has an unparseable value: {:?}", name, value))
}

/// Parse `"left,top,right,bottom"`. An empty string clears the region.
pub fn parse_roi(value: &str) -> Result<Option<RegionOfInterest>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let edges: Vec<f32> = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|_| anyhow!("ROI edge is not a number: {:?}", part))
        })
        .collect::<Result<_>>()?;
    if edges.len() != 4 {
        return Err(anyhow!(
            "ROI must be \"left,top,right,bottom\", got {:?}",
            value
        ));
    }
    Ok(Some(RegionOfInterest::new(
        edges[0], edges[1], edges[2], edges[3],
    )))
}

/// Shared, thread-safe configuration hand-off.
///
/// A settings surface updates the handle; the capture pipeline's classifier
/// snapshots it at the start of each `process` call, so every frame observes
/// a fully-updated, self-consistent configuration.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<Mutex<RuntimeConfig>>,
}

#[derive(Clone, Debug)]
struct RuntimeConfig {
    classifier: ClassifierSettings,
    roi: Option<RegionOfInterest>,
}

impl ConfigHandle {
    pub fn new(classifier: ClassifierSettings, roi: Option<RegionOfInterest>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RuntimeConfig {
                classifier: classifier.clamped(),
                roi,
            })),
        }
    }

    /// Replace the classifier settings. Takes effect on the next frame.
    pub fn set_classifier(&self, settings: ClassifierSettings) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("config lock poisoned"))?;
        guard.classifier = settings.clamped();
        Ok(())
    }

    /// Set or clear the region of interest. Takes effect on the next frame.
    pub fn set_roi(&self, roi: Option<RegionOfInterest>) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("config lock poisoned"))?;
        guard.roi = roi;
        Ok(())
    }

    /// Atomic snapshot of settings and region for one `process` call.
    pub fn snapshot(&self) -> Result<(ClassifierSettings, Option<RegionOfInterest>)> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("config lock poisoned"))?;
        Ok((guard.classifier, guard.roi))
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(ClassifierSettings::default(), None)
    }
}
