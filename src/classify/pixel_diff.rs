use anyhow::Result;

use crate::config::ClassifierSettings;
use crate::frame::Frame;
use crate::roi::RegionOfInterest;

use super::strategy::{FrameComparison, MotionStrategy};

/// Pixel-differencing strategy.
///
/// Both frames are downsampled onto a common grid, then compared pixel by
/// pixel: a pixel is changed when any color channel differs by more than
/// `pixel_diff_threshold`. The frame is motion when the changed fraction
/// strictly exceeds `size_threshold`.
///
/// With a region of interest set, both the changed count and the total count
/// are restricted to pixels whose centers fall inside the region.
#[derive(Debug, Default)]
pub struct PixelDiffStrategy;

impl PixelDiffStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MotionStrategy for PixelDiffStrategy {
    fn name(&self) -> &'static str {
        "pixel-diff"
    }

    fn evaluate(
        &mut self,
        previous: &Frame,
        current: &Frame,
        roi: Option<&RegionOfInterest>,
        settings: &ClassifierSettings,
    ) -> Result<FrameComparison> {
        if previous.width() == 0
            || previous.height() == 0
            || current.width() == 0
            || current.height() == 0
        {
            return Ok(FrameComparison::default());
        }

        // The target grid comes from the current frame so both frames land
        // on identical dimensions even across a resolution switch.
        let (width, height) = current.scaled_dims(settings.downsample_factor);
        if width == 0 || height == 0 {
            return Ok(FrameComparison::default());
        }

        let prev_small = previous.downsample_to(width, height);
        let curr_small = current.downsample_to(width, height);

        let threshold = settings.pixel_diff_threshold;
        let mut counted: u64 = 0;
        let mut changed: u64 = 0;
        for y in 0..height {
            for x in 0..width {
                if let Some(region) = roi {
                    let nx = (x as f32 + 0.5) / width as f32;
                    let ny = (y as f32 + 0.5) / height as f32;
                    if !region.contains(nx, ny) {
                        continue;
                    }
                }
                counted += 1;

                let [pr, pg, pb] = prev_small.rgb(x, y);
                let [cr, cg, cb] = curr_small.rgb(x, y);
                if pr.abs_diff(cr) > threshold
                    || pg.abs_diff(cg) > threshold
                    || pb.abs_diff(cb) > threshold
                {
                    changed += 1;
                }
            }
        }

        if counted == 0 {
            return Ok(FrameComparison::default());
        }

        let change_ratio = changed as f32 / counted as f32;
        Ok(FrameComparison {
            motion_detected: change_ratio > settings.size_threshold,
            change_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Frame::from_rgb(data, width, height).expect("frame")
    }

    /// Black frame with a white block at (x, y) of the given size.
    fn with_block(width: u32, height: u32, x0: u32, y0: u32, side: u32) -> Frame {
        let mut data = vec![0u8; (width * height * 3) as usize];
        for y in y0..(y0 + side).min(height) {
            for x in x0..(x0 + side).min(width) {
                let offset = ((y * width + x) * 3) as usize;
                data[offset..offset + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        Frame::from_rgb(data, width, height).expect("frame")
    }

    fn full_res_settings(size_threshold: f32) -> ClassifierSettings {
        ClassifierSettings {
            size_threshold,
            downsample_factor: 1.0,
            ..ClassifierSettings::default()
        }
    }

    #[test]
    fn identical_frames_have_zero_ratio() -> Result<()> {
        let frame = solid(32, 32, [80, 90, 100]);
        let mut strategy = PixelDiffStrategy::new();
        let comparison =
            strategy.evaluate(&frame, &frame.clone(), None, &full_res_settings(0.0))?;
        assert!(!comparison.motion_detected);
        assert_eq!(comparison.change_ratio, 0.0);
        Ok(())
    }

    #[test]
    fn full_change_saturates_ratio() -> Result<()> {
        let prev = solid(16, 16, [0, 0, 0]);
        let curr = solid(16, 16, [255, 255, 255]);
        let mut strategy = PixelDiffStrategy::new();
        let comparison = strategy.evaluate(&prev, &curr, None, &full_res_settings(0.99))?;
        assert!(comparison.motion_detected);
        assert_eq!(comparison.change_ratio, 1.0);
        Ok(())
    }

    #[test]
    fn block_scenario_straddles_threshold() -> Result<()> {
        // 20x20 white block in a 100x100 black frame: ratio 400/10000 = 0.04.
        let prev = solid(100, 100, [0, 0, 0]);
        let curr = with_block(100, 100, 40, 40, 20);
        let mut strategy = PixelDiffStrategy::new();

        let comparison = strategy.evaluate(&prev, &curr, None, &full_res_settings(0.03))?;
        assert!(comparison.motion_detected);
        assert!((comparison.change_ratio - 0.04).abs() < 1e-6);

        let comparison = strategy.evaluate(&prev, &curr, None, &full_res_settings(0.05))?;
        assert!(!comparison.motion_detected);
        Ok(())
    }

    #[test]
    fn sub_threshold_channel_change_is_not_motion() -> Result<()> {
        let prev = solid(16, 16, [100, 100, 100]);
        // Exactly the threshold away on every channel: strict >, no change.
        let curr = solid(16, 16, [130, 130, 130]);
        let mut strategy = PixelDiffStrategy::new();
        let comparison = strategy.evaluate(&prev, &curr, None, &full_res_settings(0.0))?;
        assert_eq!(comparison.change_ratio, 0.0);
        assert!(!comparison.motion_detected);
        Ok(())
    }

    #[test]
    fn roi_excluding_changes_reports_still() -> Result<()> {
        let prev = solid(100, 100, [0, 0, 0]);
        let curr = with_block(100, 100, 40, 40, 20);
        let mut strategy = PixelDiffStrategy::new();

        // Region over the untouched top-left corner.
        let roi = RegionOfInterest::new(0.0, 0.0, 0.3, 0.3);
        let comparison =
            strategy.evaluate(&prev, &curr, Some(&roi), &full_res_settings(0.0))?;
        assert!(!comparison.motion_detected);
        assert_eq!(comparison.change_ratio, 0.0);
        Ok(())
    }

    #[test]
    fn roi_concentrates_the_ratio() -> Result<()> {
        let prev = solid(100, 100, [0, 0, 0]);
        let curr = with_block(100, 100, 40, 40, 20);
        let mut strategy = PixelDiffStrategy::new();

        // Region exactly over the block: every counted pixel changed.
        let roi = RegionOfInterest::new(0.4, 0.4, 0.6, 0.6);
        let comparison =
            strategy.evaluate(&prev, &curr, Some(&roi), &full_res_settings(0.5))?;
        assert!(comparison.motion_detected);
        assert_eq!(comparison.change_ratio, 1.0);
        Ok(())
    }

    #[test]
    fn zero_area_roi_counts_nothing() -> Result<()> {
        let prev = solid(32, 32, [0, 0, 0]);
        let curr = solid(32, 32, [255, 255, 255]);
        let mut strategy = PixelDiffStrategy::new();
        let roi = RegionOfInterest::new(0.5, 0.1, 0.5, 0.9);
        let comparison =
            strategy.evaluate(&prev, &curr, Some(&roi), &full_res_settings(0.0))?;
        assert!(!comparison.motion_detected);
        assert_eq!(comparison.change_ratio, 0.0);
        Ok(())
    }

    #[test]
    fn zero_size_frame_is_no_change() -> Result<()> {
        let empty = Frame::from_rgb(Vec::new(), 0, 0)?;
        let curr = solid(16, 16, [255, 255, 255]);
        let mut strategy = PixelDiffStrategy::new();
        let comparison = strategy.evaluate(&empty, &curr, None, &full_res_settings(0.0))?;
        assert!(!comparison.motion_detected);
        Ok(())
    }

    #[test]
    fn downsampling_preserves_the_verdict() -> Result<()> {
        let prev = solid(100, 100, [0, 0, 0]);
        let curr = with_block(100, 100, 40, 40, 20);
        let mut strategy = PixelDiffStrategy::new();
        let settings = ClassifierSettings {
            size_threshold: 0.02,
            downsample_factor: 0.25,
            ..ClassifierSettings::default()
        };
        let comparison = strategy.evaluate(&prev, &curr, None, &settings)?;
        assert!(comparison.motion_detected);
        Ok(())
    }
}
