//! Motion Sentry
//!
//! Frame-differencing motion classifier for continuous camera monitoring.
//!
//! # Architecture
//!
//! The core is a single stateful component: `MotionClassifier` holds exactly
//! one previous frame, compares each incoming frame against it through a
//! pluggable `MotionStrategy`, and reports two independent signals per frame:
//!
//! - `motion_active`: raw per-frame motion, for a status indicator
//! - `should_notify`: the same signal gated by a notification debounce
//!
//! Surrounding the core:
//!
//! - `frame`: decoded RGB24 frame model and downsampling
//! - `roi`: normalized region-of-interest gating
//! - `config`: settings loading and the thread-safe hand-off between a
//!   settings surface and the capture pipeline
//! - `notify`: alert sink boundary (sound/haptics live behind it)
//! - `ingest`: demo/test frame sources
//!
//! Camera capture, UI, and settings persistence are external collaborators:
//! the crate receives decoded frames and emits decisions, nothing more.
//!
//! # Threading
//!
//! One producer drives `process` sequentially with a monotonic clock.
//! Configuration changes from other threads go through `ConfigHandle`, which
//! each `process` call snapshots exactly once, so a frame never observes a
//! partially-applied update.

pub mod classify;
pub mod config;
pub mod frame;
pub mod ingest;
pub mod notify;
pub mod roi;

pub use classify::{
    FrameComparison, FrameHashStrategy, MotionClassifier, MotionDecision, MotionStrategy,
    PixelDiffStrategy, StrategyRegistry,
};
pub use config::{ClassifierSettings, ConfigHandle, NotifySettings, SentryConfig};
pub use frame::Frame;
pub use notify::{AlertLogSink, MotionEvent, NotificationSink};
pub use roi::RegionOfInterest;
