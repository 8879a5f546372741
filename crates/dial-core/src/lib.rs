//! # dial-core
//!
//! Shared library for the Zone dial daemon containing the dial domain types,
//! the action catalog, Linux input code tables, and the two report decoders.
//!
//! This crate has zero dependencies on OS APIs, device nodes, or the input
//! subsystem.  Everything here can be compiled and tested on any platform.
//!
//! # Architecture overview (for beginners)
//!
//! The handheld has two rotary dials, one on each side of the screen.  Every
//! detent of a dial produces a small input signal that the kernel exposes in
//! one of two ways: as a raw HID report on a `/dev/hidrawN` node, or as a
//! relative-axis event on a `/dev/input/eventN` node.  The daemon turns each
//! of those signals into a host action (a key press, a scroll step, or a
//! brightness change).
//!
//! This crate is the shared foundation.  It defines:
//!
//! - **`domain`** – Which dial moved, in which direction, and what each dial
//!   is configured to do (the action catalog and the immutable bindings).
//!
//! - **`keymap`** – The closed set of keys and relative axes the catalog can
//!   emit, each tagged with its Linux input event code.
//!
//! - **`report`** – Decoders that turn a raw byte report or a raw input event
//!   into the one normalized [`DialTurnEvent`].

pub mod domain;
pub mod keymap;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `dial_core::DialTurnEvent` instead of `dial_core::domain::dial::DialTurnEvent`.
pub use domain::catalog::{
    ActionCatalog, ActionProfile, Capabilities, CatalogError, DialBindings, DEFAULT_LEFT_ACTION,
    DEFAULT_RIGHT_ACTION,
};
pub use domain::dial::{DialIdentity, DialTurnEvent, RotationDirection};
pub use keymap::{KeyCode, RelAxis};
pub use report::input::decode_input_event;
pub use report::raw::decode_raw_report;
