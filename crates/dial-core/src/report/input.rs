//! Decoder for relative-axis events from the dial's evdev node.
//!
//! When the HID driver is loaded, the dials appear as a relative-axis input
//! device: the left dial moves `REL_WHEEL`, the right dial moves
//! `REL_HWHEEL`.  The event value is a signed detent count.
//!
//! # Magnitude collapse
//!
//! A value of `-3` produces exactly one counter-clockwise turn, not three.
//! Only the sign is used, so a fast spin never multiplies into a burst of
//! key presses or a large brightness jump.

use tracing::trace;

use crate::domain::dial::{DialIdentity, DialTurnEvent, RotationDirection};
use crate::keymap::{RelAxis, EV_REL};

/// Axis that carries the left dial.
pub const LEFT_DIAL_AXIS: RelAxis = RelAxis::Wheel;
/// Axis that carries the right dial.
pub const RIGHT_DIAL_AXIS: RelAxis = RelAxis::HWheel;

/// Decodes one `(type, code, value)` input event.
///
/// Returns `None` for non-`EV_REL` events (including `SYN_REPORT`), axes
/// that are not mapped to a dial, and zero values.
///
/// # Examples
///
/// ```rust
/// use dial_core::{decode_input_event, DialIdentity, RotationDirection};
///
/// // EV_REL, REL_WHEEL, -3
/// let event = decode_input_event(0x02, 0x08, -3).unwrap();
/// assert_eq!(event.identity, DialIdentity::Left);
/// assert_eq!(event.direction, RotationDirection::CounterClockwise);
/// ```
pub fn decode_input_event(event_type: u16, code: u16, value: i32) -> Option<DialTurnEvent> {
    if event_type != EV_REL {
        return None;
    }

    let identity = match RelAxis::from_linux_code(code) {
        Some(axis) if axis == LEFT_DIAL_AXIS => DialIdentity::Left,
        Some(axis) if axis == RIGHT_DIAL_AXIS => DialIdentity::Right,
        _ => {
            trace!("ignoring relative event on unmapped axis {code}");
            return None;
        }
    };

    let direction = RotationDirection::from_signed(value)?;
    Some(DialTurnEvent::new(identity, direction))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
