//! Linux uinput virtual device.
//!
//! # What is uinput? (for beginners)
//!
//! `/dev/uinput` lets a process create a virtual input device.  Events
//! written to it are delivered to the desktop exactly like events from a real
//! keyboard or mouse.  A device must declare its capabilities (the keys and
//! relative axes it may emit) when it is created; events outside that set are
//! dropped by the kernel.
//!
//! # Frames
//!
//! The kernel groups events into frames terminated by `SYN_REPORT`.  This
//! type buffers events in `pending` and writes them all in one
//! [`VirtualDevice::emit`] call on `commit`; `emit` appends the `SYN_REPORT`.
//! A failed write still clears the buffer, and `discard` drops a frame the
//! caller abandoned, so a half-built frame never leaks into the next one.
//!
//! # Permissions
//!
//! Creating the device requires write access to `/dev/uinput` (root or the
//! `uinput`/`input` group, depending on the distribution).  The constructor
//! fails with an `Io` error otherwise.

use std::sync::Mutex;

use dial_core::{ActionCatalog, Capabilities, KeyCode, RelAxis};
use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AttributeSet, EventType, InputEvent, Key, RelativeAxisType,
};
use tracing::info;

use super::VIRTUAL_DEVICE_NAME;
use crate::application::dispatch::{OutputError, VirtualOutput};

/// uinput-backed implementation of [`VirtualOutput`].
pub struct UinputOutput {
    device: Mutex<VirtualDevice>,
    pending: Mutex<Vec<InputEvent>>,
}

impl UinputOutput {
    /// Creates the virtual device with every key and axis the action catalog
    /// can emit, so any binding works without recreating it.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Io` if `/dev/uinput` cannot be opened or the
    /// device cannot be registered.
    pub fn new() -> Result<Self, OutputError> {
        Self::with_capabilities(&ActionCatalog::capabilities())
    }

    /// Creates the virtual device with an explicit capability set.
    pub fn with_capabilities(caps: &Capabilities) -> Result<Self, OutputError> {
        let mut keys = AttributeSet::<Key>::new();
        for key in &caps.keys {
            keys.insert(Key::new(key.linux_code()));
        }
        let mut axes = AttributeSet::<RelativeAxisType>::new();
        for axis in &caps.axes {
            axes.insert(RelativeAxisType(axis.linux_code()));
        }

        let device = VirtualDeviceBuilder::new()?
            .name(VIRTUAL_DEVICE_NAME)
            .with_keys(&keys)?
            .with_relative_axes(&axes)?
            .build()?;

        info!(
            keys = caps.keys.len(),
            axes = caps.axes.len(),
            "created virtual input device {VIRTUAL_DEVICE_NAME:?}"
        );
        Ok(Self {
            device: Mutex::new(device),
            pending: Mutex::new(Vec::new()),
        })
    }

    fn queue(&self, event: InputEvent) -> Result<(), OutputError> {
        self.pending
            .lock()
            .map_err(|_| OutputError::Platform("pending buffer lock poisoned".into()))?
            .push(event);
        Ok(())
    }
}

impl VirtualOutput for UinputOutput {
    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), OutputError> {
        self.queue(InputEvent::new(
            EventType::KEY,
            key.linux_code(),
            i32::from(pressed),
        ))
    }

    fn emit_relative(&self, axis: RelAxis, amount: i32) -> Result<(), OutputError> {
        self.queue(InputEvent::new(EventType::RELATIVE, axis.linux_code(), amount))
    }

    fn commit(&self) -> Result<(), OutputError> {
        let frame = std::mem::take(
            &mut *self
                .pending
                .lock()
                .map_err(|_| OutputError::Platform("pending buffer lock poisoned".into()))?,
        );
        if frame.is_empty() {
            return Ok(());
        }
        let mut device = self
            .device
            .lock()
            .map_err(|_| OutputError::Platform("uinput device lock poisoned".into()))?;
        device.emit(&frame)?;
        Ok(())
    }

    fn discard(&self) {
        match self.pending.lock() {
            Ok(mut pending) => pending.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
