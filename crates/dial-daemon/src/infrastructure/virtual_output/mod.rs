//! Synthetic input device implementations.
//!
//! The uinput device is only available on Linux and is selected at compile
//! time via `#[cfg(target_os = "linux")]`.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

/// Name the virtual device registers under.  The evdev locator skips any
/// device with this name so the daemon never grabs its own output.
pub const VIRTUAL_DEVICE_NAME: &str = "Zotac-Zone-Dials";
