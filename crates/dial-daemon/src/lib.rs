//! dial-daemon library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the daemon do? (for beginners)
//!
//! The handheld's two dials produce a tiny signal per detent.  The daemon:
//!
//! 1. Finds the dial's device node (a `hidraw` node matched by USB
//!    vendor/product, or an evdev node matched by name).
//! 2. Opens it (and, for evdev, grabs it so nothing else sees the raw wheel
//!    events).
//! 3. Decodes each report into a [`dial_core::DialTurnEvent`].
//! 4. Looks up what that dial is bound to (`volume`, `scroll`, `brightness`,
//!    ...) and performs the action through a synthetic uinput device or the
//!    sysfs backlight.
//! 5. Goes back to step 1 whenever the device disappears.

/// Application layer: action dispatch and the session state machine.
pub mod application;

/// Infrastructure layer: device nodes, uinput, sysfs, and configuration.
pub mod infrastructure;
