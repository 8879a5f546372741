//! Report decoders.
//!
//! Two input shapes, one output shape:
//!
//! - **`raw`** – fixed-layout byte reports read from a `hidraw` node.
//! - **`input`** – `(type, code, value)` triples read from an evdev node.
//!
//! Both produce `Option<DialTurnEvent>`.  Decoding never fails: anything
//! malformed or unrecognized is `None` and the caller simply keeps reading.

pub mod input;
pub mod raw;
