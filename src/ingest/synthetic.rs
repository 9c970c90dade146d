use anyhow::Result;
use rand::Rng;

use crate::frame::Frame;

/// Configuration for the synthetic scene source.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    pub width: u32,
    pub height: u32,
    /// Frames between jumps of the bright block. One jump produces exactly
    /// one frame of motion.
    pub motion_period: u64,
    /// Peak per-channel sensor noise. Keep below the classifier's pixel
    /// threshold to stay sub-detection.
    pub noise: u8,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            motion_period: 50,
            noise: 6,
        }
    }
}

/// Synthetic frame source: a flat gray scene with a bright block that jumps
/// to a new position every `motion_period` frames.
pub struct SyntheticSource {
    config: SyntheticConfig,
    frame_count: u64,
    scene_state: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            scene_state: 0,
        }
    }

    pub fn connect(&mut self) -> Result<()> {
        log::info!(
            "SyntheticSource: {}x{} scene, motion every {} frames",
            self.config.width,
            self.config.height,
            self.config.motion_period
        );
        Ok(())
    }

    pub fn next_frame(&mut self) -> Result<Frame> {
        self.frame_count += 1;
        if self.config.motion_period > 0 && self.frame_count % self.config.motion_period == 0 {
            self.scene_state += 1;
        }
        let pixels = self.generate_pixels();
        Frame::from_rgb(pixels, self.config.width, self.config.height)
    }

    fn generate_pixels(&self) -> Vec<u8> {
        let width = self.config.width as u64;
        let height = self.config.height as u64;
        let mut pixels = vec![96u8; (width * height * 3) as usize];

        // Block side is a quarter of the short axis; position hops with the
        // scene state.
        let side = (width.min(height) / 4).max(1);
        let x0 = (self.scene_state * 61) % width.saturating_sub(side).max(1);
        let y0 = (self.scene_state * 37) % height.saturating_sub(side).max(1);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                let offset = ((y * width + x) * 3) as usize;
                pixels[offset..offset + 3].copy_from_slice(&[230, 230, 230]);
            }
        }

        if self.config.noise > 0 {
            let mut rng = rand::thread_rng();
            for value in pixels.iter_mut() {
                let jitter = rng.gen_range(0..=self.config.noise);
                *value = value.saturating_add(jitter);
            }
        }
        pixels
    }

    pub fn stats(&self) -> SyntheticStats {
        SyntheticStats {
            frames_generated: self.frame_count,
            scene_changes: self.scene_state,
        }
    }
}

/// Statistics for a synthetic source.
#[derive(Clone, Debug)]
pub struct SyntheticStats {
    pub frames_generated: u64,
    pub scene_changes: u64,
}
