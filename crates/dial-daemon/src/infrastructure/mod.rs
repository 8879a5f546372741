//! Infrastructure layer for the dial daemon.
//!
//! Contains OS-facing adapters: device node discovery, the two dial input
//! sources, the uinput virtual device, the sysfs backlight, and the config
//! file loader.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `dial_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`locator`** – Finds the dial's `hidraw` node (by USB vendor/product in
//!   sysfs) or evdev node (by device name).
//!
//! - **`event_source`** – The two [`crate::application::session::DialBackend`]
//!   implementations (`hidraw` raw reports and grabbed evdev), plus a
//!   scripted backend for tests.
//!
//! - **`virtual_output`** – Implementations of
//!   [`crate::application::dispatch::VirtualOutput`]: a uinput device on Linux
//!   and a recording mock for tests.
//!
//! - **`backlight`** – Sysfs implementation of
//!   [`crate::application::dispatch::BacklightControl`].
//!
//! - **`storage`** – TOML configuration file.

pub mod backlight;
pub mod event_source;
pub mod locator;
pub mod storage;
pub mod virtual_output;
