use anyhow::Result;

use crate::config::ClassifierSettings;
use crate::frame::Frame;
use crate::roi::RegionOfInterest;

/// Verdict of comparing two frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameComparison {
    /// Did the pair show motion under the active settings?
    pub motion_detected: bool,
    /// Fraction of evaluated pixels that changed, `[0,1]`. Strategies that
    /// do not count pixels report 0.0 or 1.0.
    pub change_ratio: f32,
}

/// Frame-comparison strategy.
///
/// Implementations must be bounded synchronous computations: no I/O, no
/// blocking, no retained references to either frame beyond the call. The
/// classifier owns all cross-frame state (previous frame, debounce); a
/// strategy only judges one pair.
pub trait MotionStrategy: Send {
    /// Strategy identifier, used for registry lookup and logging.
    fn name(&self) -> &'static str;

    /// Compare `previous` against `current` under the given settings.
    ///
    /// A degenerate pair (zero-size frame, empty region) is "no motion",
    /// never an error; errors are reserved for failures such as allocation
    /// exhaustion, which cost the caller one decision and nothing else.
    fn evaluate(
        &mut self,
        previous: &Frame,
        current: &Frame,
        roi: Option<&RegionOfInterest>,
        settings: &ClassifierSettings,
    ) -> Result<FrameComparison>;
}
