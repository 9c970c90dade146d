//! Motion classification.
//!
//! - `MotionClassifier`: stateful per-frame driver — previous-frame window,
//!   notification debounce, configuration snapshotting.
//! - `MotionStrategy`: the swappable frame-comparison seam. The shipped
//!   strategies are deterministic; a remote-inference strategy would plug in
//!   behind the same trait.
//! - `StrategyRegistry`: name-keyed strategy lookup for process wiring.

mod classifier;
mod frame_hash;
mod pixel_diff;
mod registry;
mod strategy;

pub use classifier::{MotionClassifier, MotionDecision};
pub use frame_hash::FrameHashStrategy;
pub use pixel_diff::PixelDiffStrategy;
pub use registry::StrategyRegistry;
pub use strategy::{FrameComparison, MotionStrategy};
