//! Application layer use cases for the dial daemon.
//!
//! - **`dispatch`** – Maps a decoded dial turn to the bound action and
//!   performs it through the injected [`dispatch::VirtualOutput`] and
//!   [`dispatch::BacklightControl`] implementations.
//!
//! - **`session`** – The device lifecycle state machine: search, open, poll,
//!   dispatch, and recover.  It is generic over a [`session::DialBackend`],
//!   so the raw-report and evdev hardware modes share one loop.

pub mod dispatch;
pub mod session;
