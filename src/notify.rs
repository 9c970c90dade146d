//! Notification sink boundary.
//!
//! The classifier emits debounced alert decisions; what happens next —
//! sound, haptics, a push message — lives behind `NotificationSink`.
//! Playback devices are externally-owned resources: an implementation
//! acquires its device handle scoped to one `notify` call or to its own
//! lifetime, and must release it when playback completes or the sink is
//! dropped.

use anyhow::Result;

use crate::config::NotifySettings;

/// One debounced motion alert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEvent {
    /// Monotonic milliseconds, the `now_ms` of the triggering `process` call.
    pub timestamp_ms: i64,
    /// Change ratio of the triggering frame.
    pub change_ratio: f32,
}

/// Consumer of motion alerts.
pub trait NotificationSink: Send {
    fn notify(&mut self, event: &MotionEvent) -> Result<()>;
}

/// Logging sink: the in-process stand-in for sound and vibration hardware.
///
/// Honors the same enable flags and volume a playback sink would, so wiring
/// and configuration can be exercised end to end without audio devices.
pub struct AlertLogSink {
    settings: NotifySettings,
}

impl AlertLogSink {
    pub fn new(settings: NotifySettings) -> Self {
        Self { settings }
    }
}

impl NotificationSink for AlertLogSink {
    fn notify(&mut self, event: &MotionEvent) -> Result<()> {
        if self.settings.sound_enabled {
            log::info!(
                "AlertLogSink: motion alert at {}ms (ratio {:.4}), sound at volume {:.2}",
                event.timestamp_ms,
                event.change_ratio,
                self.settings.sound_volume
            );
        }
        if self.settings.vibration_enabled {
            log::info!("AlertLogSink: vibration pulse");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_accepts_events() -> Result<()> {
        let mut sink = AlertLogSink::new(NotifySettings::default());
        sink.notify(&MotionEvent {
            timestamp_ms: 1234,
            change_ratio: 0.25,
        })
    }
}
