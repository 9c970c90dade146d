use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::config::ClassifierSettings;
use crate::frame::Frame;
use crate::roi::RegionOfInterest;

use super::strategy::{FrameComparison, MotionStrategy};

/// Exact-change strategy: hashes both frames and reports motion on any byte
/// difference.
///
/// Whole-frame by construction — the region of interest and the size
/// threshold do not apply, and a single-pixel flicker already counts as
/// motion. Suited to synthetic inputs and low-power deployments where the
/// source is noise-free; real sensors want `PixelDiffStrategy`.
#[derive(Debug, Default)]
pub struct FrameHashStrategy;

impl FrameHashStrategy {
    pub fn new() -> Self {
        Self
    }

    fn digest(frame: &Frame) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(frame.width().to_le_bytes());
        hasher.update(frame.height().to_le_bytes());
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                hasher.update(frame.rgb(x, y));
            }
        }
        hasher.finalize().into()
    }
}

impl MotionStrategy for FrameHashStrategy {
    fn name(&self) -> &'static str {
        "frame-hash"
    }

    fn evaluate(
        &mut self,
        previous: &Frame,
        current: &Frame,
        _roi: Option<&RegionOfInterest>,
        _settings: &ClassifierSettings,
    ) -> Result<FrameComparison> {
        let motion = Self::digest(previous) != Self::digest(current);
        Ok(FrameComparison {
            motion_detected: motion,
            change_ratio: if motion { 1.0 } else { 0.0 },
        })
    }
}
