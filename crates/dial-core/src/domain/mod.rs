//! Domain entities for the dial daemon.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! - **`dial`** – The physical dials, rotation directions, and the normalized
//!   turn event that both decoders produce.
//! - **`catalog`** – The fixed catalog of named actions and the per-dial
//!   bindings chosen once at startup.

pub mod catalog;
pub mod dial;
