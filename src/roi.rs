//! Region of interest.
//!
//! A normalized sub-rectangle of the frame within which changes are
//! evaluated. Coordinates are relative to frame dimensions, so one region
//! keeps meaning the same area across resolution switches.

use serde::{Deserialize, Serialize};

/// Normalized `[0,1]` rectangle, `left < right` and `top < bottom` for a
/// non-degenerate region.
///
/// Construction clamps rather than rejects: a malformed region from an
/// editor or a stale settings store must not take down a live capture
/// pipeline. A zero-area region is representable and simply never contains
/// a pixel center.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegionOfInterest {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RegionOfInterest {
    /// Build a region, clamping each edge into `[0,1]` and ordering the
    /// pairs so `left <= right` and `top <= bottom`.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let clamp = |v: f32| {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        };
        let (l, r) = (clamp(left), clamp(right));
        let (t, b) = (clamp(top), clamp(bottom));
        Self {
            left: l.min(r),
            top: t.min(b),
            right: l.max(r),
            bottom: t.max(b),
        }
    }

    /// Half-open containment test for a normalized coordinate.
    pub fn contains(&self, nx: f32, ny: f32) -> bool {
        nx >= self.left && nx < self.right && ny >= self.top && ny < self.bottom
    }

    pub fn is_degenerate(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}
