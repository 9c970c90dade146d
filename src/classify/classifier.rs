use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::config::ConfigHandle;
use crate::frame::Frame;

use super::pixel_diff::PixelDiffStrategy;
use super::strategy::MotionStrategy;

/// Per-frame classification outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionDecision {
    /// Raw per-frame motion state, suitable for a status indicator.
    pub motion_active: bool,
    /// Debounced alert decision. Rate-limited independently of
    /// `motion_active`: an indicator may stay on while alerts fire
    /// periodically.
    pub should_notify: bool,
    /// Change ratio reported by the strategy, for logging and tuning.
    pub change_ratio: f32,
}

/// Stateful motion classifier.
///
/// Owns a rolling window of exactly one previous frame. Each `process` call
/// compares the incoming frame against it, applies the notification
/// debounce, and replaces the stored frame — full resolution, so later
/// region or threshold changes stay accurate.
///
/// Designed for a single producer delivering frames sequentially with a
/// non-decreasing clock; the classifier itself is not internally
/// synchronized. Cross-thread configuration updates flow through the
/// `ConfigHandle`, which each call snapshots exactly once.
pub struct MotionClassifier {
    config: ConfigHandle,
    strategy: Arc<Mutex<dyn MotionStrategy>>,
    previous: Option<Frame>,
    last_notify_ms: Option<i64>,
    motion_active: bool,
}

impl MotionClassifier {
    pub fn new(config: ConfigHandle, strategy: Arc<Mutex<dyn MotionStrategy>>) -> Self {
        Self {
            config,
            strategy,
            previous: None,
            last_notify_ms: None,
            motion_active: false,
        }
    }

    /// Classifier with the standard pixel-differencing strategy.
    pub fn with_pixel_diff(config: ConfigHandle) -> Self {
        Self::new(config, Arc::new(Mutex::new(PixelDiffStrategy::new())))
    }

    /// Classify one frame.
    ///
    /// `now_ms` is a monotonic millisecond clock, non-decreasing across
    /// calls. The first frame only seeds the window and can never itself
    /// signal motion.
    ///
    /// On a strategy error the stored previous frame is still replaced, so
    /// one failed evaluation costs exactly one decision and the stream
    /// continues with the next frame.
    pub fn process(&mut self, frame: Frame, now_ms: i64) -> Result<MotionDecision> {
        let (settings, roi) = self.config.snapshot()?;

        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => {
                self.previous = Some(frame);
                self.motion_active = false;
                return Ok(MotionDecision::default());
            }
        };

        let comparison = {
            let mut strategy = self
                .strategy
                .lock()
                .map_err(|_| anyhow!("strategy lock poisoned"))?;
            strategy.evaluate(&previous, &frame, roi.as_ref(), &settings)
        };
        let comparison = match comparison {
            Ok(comparison) => comparison,
            Err(err) => {
                self.previous = Some(frame);
                return Err(err);
            }
        };

        let motion = comparison.motion_detected;
        let should_notify = motion
            && self
                .last_notify_ms
                .map_or(true, |last| now_ms - last > settings.speed_threshold_ms);
        if should_notify {
            self.last_notify_ms = Some(now_ms);
        }

        log::debug!(
            "MotionClassifier: change_ratio={:.4} threshold={} motion={} notify={}",
            comparison.change_ratio,
            settings.size_threshold,
            motion,
            should_notify
        );

        self.motion_active = motion;
        self.previous = Some(frame);
        Ok(MotionDecision {
            motion_active: motion,
            should_notify,
            change_ratio: comparison.change_ratio,
        })
    }

    /// Raw motion state of the most recent frame.
    pub fn is_motion_active(&self) -> bool {
        self.motion_active
    }

    /// Drop the previous frame and notification state, as when the capture
    /// pipeline restarts. The next frame seeds a fresh window.
    pub fn reset(&mut self) {
        self.previous = None;
        self.last_notify_ms = None;
        self.motion_active = false;
    }
}
