//! Device node discovery.
//!
//! Locators are read-only and never fail: a missing directory, an unreadable
//! file, or a malformed entry simply does not match.  Candidates are scanned
//! in lexicographically sorted order and the first match wins.

pub mod hidraw;
pub mod input;

pub use hidraw::HidrawLocator;
pub use input::{select_first_match, DIAL_INPUT_NAME};

#[cfg(target_os = "linux")]
pub use input::EvdevLocator;
