//! Dial identities, rotation directions, and the normalized turn event.
//!
//! # Sign convention
//!
//! Clockwise rotation is the profile's "up" branch and maps to `+1`;
//! counter-clockwise is the "down" branch and maps to `-1`.  The same
//! convention applies to every action profile variant, so a key pair, a
//! scroll axis, and the backlight all agree on which way is "up".

use std::fmt;

/// One of the two physical dials on the handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialIdentity {
    /// The dial on the left side of the screen.
    Left,
    /// The dial on the right side of the screen.
    Right,
}

impl fmt::Display for DialIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialIdentity::Left => f.write_str("left"),
            DialIdentity::Right => f.write_str("right"),
        }
    }
}

/// Direction of a single dial detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// Clockwise ("up").
    Clockwise,
    /// Counter-clockwise ("down").
    CounterClockwise,
}

impl RotationDirection {
    /// Returns `+1` for [`Clockwise`](Self::Clockwise) and `-1` for
    /// [`CounterClockwise`](Self::CounterClockwise).
    pub fn sign(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }

    /// Derives a direction from a signed magnitude.
    ///
    /// Only the sign is used; zero has no direction and returns `None`.
    pub fn from_signed(value: i32) -> Option<Self> {
        match value.signum() {
            1 => Some(RotationDirection::Clockwise),
            -1 => Some(RotationDirection::CounterClockwise),
            _ => None,
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationDirection::Clockwise => f.write_str("clockwise"),
            RotationDirection::CounterClockwise => f.write_str("counter-clockwise"),
        }
    }
}

/// A decoded dial detent: which dial moved and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialTurnEvent {
    pub identity: DialIdentity,
    pub direction: RotationDirection,
}

impl DialTurnEvent {
    pub fn new(identity: DialIdentity, direction: RotationDirection) -> Self {
        Self { identity, direction }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_sign_is_positive() {
        assert_eq!(RotationDirection::Clockwise.sign(), 1);
    }

    #[test]
    fn test_counter_clockwise_sign_is_negative() {
        assert_eq!(RotationDirection::CounterClockwise.sign(), -1);
    }

    #[test]
    fn test_from_signed_collapses_magnitude_to_direction() {
        // Arrange / Act / Assert
        assert_eq!(
            RotationDirection::from_signed(7),
            Some(RotationDirection::Clockwise)
        );
        assert_eq!(
            RotationDirection::from_signed(-3),
            Some(RotationDirection::CounterClockwise)
        );
    }

    #[test]
    fn test_from_signed_zero_has_no_direction() {
        assert_eq!(RotationDirection::from_signed(0), None);
    }

    #[test]
    fn test_display_names_are_lowercase() {
        assert_eq!(DialIdentity::Left.to_string(), "left");
        assert_eq!(RotationDirection::CounterClockwise.to_string(), "counter-clockwise");
    }
}
