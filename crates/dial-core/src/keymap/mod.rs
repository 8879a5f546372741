//! Keys and relative axes the action catalog can emit.
//!
//! The daemon only ever injects a handful of keys, so instead of a full
//! keyboard table this module defines two closed enums whose variants carry
//! their Linux input event codes (`include/uapi/linux/input-event-codes.h`).
//!
//! # What is an input event code? (for beginners)
//!
//! The Linux input subsystem describes every event as a triple
//! `(type, code, value)`:
//!
//! | type      | code example         | value meaning            |
//! |-----------|----------------------|--------------------------|
//! | `EV_KEY`  | `KEY_VOLUMEUP` = 115 | 1 = press, 0 = release   |
//! | `EV_REL`  | `REL_WHEEL` = 8      | signed number of detents |
//! | `EV_SYN`  | `SYN_REPORT` = 0     | end of one input frame   |
//!
//! A synthetic (uinput) device must declare up front which key and axis codes
//! it can produce; see [`crate::Capabilities`].

use std::fmt;

/// `EV_SYN` event type.
pub const EV_SYN: u16 = 0x00;
/// `EV_KEY` event type.
pub const EV_KEY: u16 = 0x01;
/// `EV_REL` event type.
pub const EV_REL: u16 = 0x02;

/// A key the catalog can press and release.
///
/// The numeric value of each variant is its Linux `KEY_*` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum KeyCode {
    LeftCtrl = 29,     // KEY_LEFTCTRL
    Up = 103,          // KEY_UP
    PageUp = 104,      // KEY_PAGEUP
    Left = 105,        // KEY_LEFT
    Right = 106,       // KEY_RIGHT
    Down = 108,        // KEY_DOWN
    PageDown = 109,    // KEY_PAGEDOWN
    VolumeDown = 114,  // KEY_VOLUMEDOWN
    VolumeUp = 115,    // KEY_VOLUMEUP
    NextSong = 163,    // KEY_NEXTSONG
    PreviousSong = 165, // KEY_PREVIOUSSONG
    ZoomIn = 0x1A2,    // KEY_ZOOMIN
    ZoomOut = 0x1A3,   // KEY_ZOOMOUT
}

impl KeyCode {
    /// Every key variant, in ascending code order.
    pub const ALL: [KeyCode; 13] = [
        KeyCode::LeftCtrl,
        KeyCode::Up,
        KeyCode::PageUp,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::PageDown,
        KeyCode::VolumeDown,
        KeyCode::VolumeUp,
        KeyCode::NextSong,
        KeyCode::PreviousSong,
        KeyCode::ZoomIn,
        KeyCode::ZoomOut,
    ];

    /// Returns the Linux `KEY_*` code for this key.
    pub fn linux_code(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.linux_code())
    }
}

/// A relative axis the catalog can move.
///
/// The numeric value of each variant is its Linux `REL_*` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum RelAxis {
    /// Horizontal scroll wheel (`REL_HWHEEL`).
    HWheel = 0x06,
    /// Vertical scroll wheel (`REL_WHEEL`).
    Wheel = 0x08,
}

impl RelAxis {
    /// Returns the Linux `REL_*` code for this axis.
    pub fn linux_code(self) -> u16 {
        self as u16
    }

    /// Looks up an axis by its Linux `REL_*` code.
    pub fn from_linux_code(code: u16) -> Option<Self> {
        match code {
            0x06 => Some(RelAxis::HWheel),
            0x08 => Some(RelAxis::Wheel),
            _ => None,
        }
    }
}

impl fmt::Display for RelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.linux_code())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
