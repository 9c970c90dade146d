//! Decoded frame model.
//!
//! - `Frame`: Immutable RGB24 pixel grid. Bytes are private; access is per-pixel.
//! - Downsampling: deterministic nearest-neighbor resampling used to bound
//!   comparison cost.
//!
//! Frames arrive here already decoded and normalized to RGB24. Color-space
//! conversion is an ingestion concern and MUST happen before construction.

use anyhow::{anyhow, Result};

/// Immutable RGB24 frame. Pixel data is private; there is no mutable access
/// after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Private pixel data, 3 bytes per pixel, row-major.
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Create a frame from an RGB24 buffer.
    ///
    /// The buffer length must equal `width * height * 3`. Zero-dimension
    /// frames are representable: a degenerate capture is treated downstream
    /// as "no change", never as a hard failure.
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))?;
        if data.len() != expected {
            return Err(anyhow!(
                "RGB frame length mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Red/green/blue channels of the pixel at `(x, y)`.
    ///
    /// Callers must stay within bounds; all in-crate loops iterate over the
    /// frame's own dimensions.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = ((y as usize * self.width as usize) + x as usize) * 3;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Target grid dimensions for a downsample factor, rounded per axis.
    pub fn scaled_dims(&self, factor: f32) -> (u32, u32) {
        (
            (self.width as f32 * factor).round() as u32,
            (self.height as f32 * factor).round() as u32,
        )
    }

    /// Nearest-neighbor downsample onto a fixed target grid.
    ///
    /// Output pixel `(x, y)` samples the source pixel under the output pixel
    /// center, so two frames downsampled to the same grid compare the same
    /// source regions regardless of their native resolutions.
    pub fn downsample_to(&self, width: u32, height: u32) -> Frame {
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return Frame {
                data: Vec::new(),
                width: 0,
                height: 0,
            };
        }
        if width == self.width && height == self.height {
            return self.clone();
        }

        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height as f32;
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            let src_y = (((y as f32 + 0.5) * sy) as u32).min(self.height - 1);
            for x in 0..width {
                let src_x = (((x as f32 + 0.5) * sx) as u32).min(self.width - 1);
                data.extend_from_slice(&self.rgb(src_x, src_y));
            }
        }
        Frame {
            data,
            width,
            height,
        }
    }
}

impl From<&image::RgbImage> for Frame {
    fn from(img: &image::RgbImage) -> Self {
        Self {
            data: img.as_raw().clone(),
            width: img.width(),
            height: img.height(),
        }
    }
}
