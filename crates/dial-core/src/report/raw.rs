//! Decoder for the dial interface's raw HID reports.
//!
//! Report layout (only the bytes the decoder looks at):
//! ```text
//! [report_id:1][..:2][trigger:1][..]
//! ```
//!
//! | Trigger | Dial  | Direction         |
//! |---------|-------|-------------------|
//! | `0x00`  | –     | no event          |
//! | `0x01`  | right | clockwise         |
//! | `0x02`  | right | counter-clockwise |
//! | `0x08`  | left  | clockwise         |
//! | `0x10`  | left  | counter-clockwise |
//!
//! Any other trigger value is ignored so that firmware adding new codes does
//! not disturb the daemon.

use tracing::trace;

use crate::domain::dial::{DialIdentity, DialTurnEvent, RotationDirection};

/// Report ID of the dial report.
pub const DIAL_REPORT_ID: u8 = 0x03;
/// Offset of the trigger byte inside the report.
pub const TRIGGER_OFFSET: usize = 3;
/// Shortest report that carries a trigger byte.
pub const MIN_REPORT_LEN: usize = TRIGGER_OFFSET + 1;
/// Read buffer size for one report.
pub const MAX_REPORT_LEN: usize = 64;

pub const TRIGGER_NONE: u8 = 0x00;
pub const TRIGGER_RIGHT_CW: u8 = 0x01;
pub const TRIGGER_RIGHT_CCW: u8 = 0x02;
pub const TRIGGER_LEFT_CW: u8 = 0x08;
pub const TRIGGER_LEFT_CCW: u8 = 0x10;

/// Decodes one raw report.
///
/// Returns `None` for short reports, reports with a different report ID, the
/// zero trigger, and unknown trigger codes.
///
/// # Examples
///
/// ```rust
/// use dial_core::{decode_raw_report, DialIdentity, RotationDirection};
///
/// let event = decode_raw_report(&[0x03, 0x00, 0x00, 0x08]).unwrap();
/// assert_eq!(event.identity, DialIdentity::Left);
/// assert_eq!(event.direction, RotationDirection::Clockwise);
/// ```
pub fn decode_raw_report(report: &[u8]) -> Option<DialTurnEvent> {
    if report.len() < MIN_REPORT_LEN || report[0] != DIAL_REPORT_ID {
        return None;
    }

    let (identity, direction) = match report[TRIGGER_OFFSET] {
        TRIGGER_NONE => return None,
        TRIGGER_LEFT_CCW => (DialIdentity::Left, RotationDirection::CounterClockwise),
        TRIGGER_LEFT_CW => (DialIdentity::Left, RotationDirection::Clockwise),
        TRIGGER_RIGHT_CCW => (DialIdentity::Right, RotationDirection::CounterClockwise),
        TRIGGER_RIGHT_CW => (DialIdentity::Right, RotationDirection::Clockwise),
        other => {
            trace!("ignoring dial report with unknown trigger 0x{other:02X}");
            return None;
        }
    };

    Some(DialTurnEvent::new(identity, direction))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
