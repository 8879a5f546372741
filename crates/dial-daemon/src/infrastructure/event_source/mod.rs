//! Dial input sources: one [`DialBackend`](crate::application::session::DialBackend)
//! per hardware mode.
//!
//! - **`hidraw`** – Reads the fixed-format raw report stream.  No lock is
//!   taken on the node; other readers see the same reports.
//! - **`evdev`** – Reads relative-axis events from the dial's input device,
//!   holding an exclusive grab so the desktop never sees the raw wheel
//!   motion.
//! - **`mock`** – Scripted backend for session tests.
//!
//! Both real handles wait with `poll(2)` bounded by a heartbeat timeout, so
//! the session loop regains control at least once per heartbeat even when
//! the dials are idle.

use serde::{Deserialize, Serialize};

pub mod mock;

#[cfg(target_os = "linux")]
pub mod evdev;
#[cfg(target_os = "linux")]
pub mod hidraw;

/// Hardware integration mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Raw HID reports from `/dev/hidrawN`.
    #[default]
    Hidraw,
    /// Relative-axis events from a grabbed `/dev/input/eventN`.
    Evdev,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Hidraw => "hidraw",
            Self::Evdev => "evdev",
        })
    }
}

/// Converts a heartbeat to a `poll(2)` timeout in milliseconds.
///
/// Saturates at `u16::MAX`; config loading rejects longer heartbeats.
#[cfg(target_os = "linux")]
fn poll_timeout(heartbeat: std::time::Duration) -> nix::poll::PollTimeout {
    let ms = u16::try_from(heartbeat.as_millis()).unwrap_or(u16::MAX);
    nix::poll::PollTimeout::from(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_mode_defaults_to_hidraw() {
        assert_eq!(SourceMode::default(), SourceMode::Hidraw);
    }

    #[test]
    fn test_source_mode_display_matches_config_spelling() {
        assert_eq!(SourceMode::Hidraw.to_string(), "hidraw");
        assert_eq!(SourceMode::Evdev.to_string(), "evdev");
    }
}
