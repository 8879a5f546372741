//! Recording virtual output for tests.
//!
//! Events queued with `emit_key` / `emit_relative` sit in `pending` until
//! `commit` moves them, as one frame, into `frames`.  Tests assert on
//! `frames()` to check both content and frame boundaries.
//!
//! Set `should_fail = true` to make every call return
//! `OutputError::Platform`, or `fail_relative = true` to fail only axis
//! events (a half-queued frame).

use std::sync::Mutex;

use dial_core::{KeyCode, RelAxis};

use crate::application::dispatch::{OutputError, VirtualOutput};

/// One queued synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Key { key: KeyCode, pressed: bool },
    Relative { axis: RelAxis, amount: i32 },
}

/// A mock output that records committed frames without touching uinput.
#[derive(Default)]
pub struct MockVirtualOutput {
    pub(crate) pending: Mutex<Vec<OutputEvent>>,
    pub(crate) frames: Mutex<Vec<Vec<OutputEvent>>>,
    /// When `true`, every method returns an error.
    pub should_fail: bool,
    /// When `true`, only `emit_relative` returns an error.
    pub fail_relative: bool,
}

impl MockVirtualOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every committed frame, oldest first.
    pub fn frames(&self) -> Vec<Vec<OutputEvent>> {
        self.frames.lock().unwrap().clone()
    }

    /// Returns the events queued since the last commit or discard.
    pub fn pending(&self) -> Vec<OutputEvent> {
        self.pending.lock().unwrap().clone()
    }

    /// Returns every committed event, flattened in emission order.
    pub fn events(&self) -> Vec<OutputEvent> {
        self.frames().into_iter().flatten().collect()
    }

    fn push(&self, event: OutputEvent) -> Result<(), OutputError> {
        if self.should_fail {
            return Err(OutputError::Platform("mock failure".into()));
        }
        self.pending.lock().unwrap().push(event);
        Ok(())
    }
}

impl VirtualOutput for MockVirtualOutput {
    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), OutputError> {
        self.push(OutputEvent::Key { key, pressed })
    }

    fn emit_relative(&self, axis: RelAxis, amount: i32) -> Result<(), OutputError> {
        if self.fail_relative {
            return Err(OutputError::Platform("mock axis failure".into()));
        }
        self.push(OutputEvent::Relative { axis, amount })
    }

    fn commit(&self) -> Result<(), OutputError> {
        if self.should_fail {
            return Err(OutputError::Platform("mock failure".into()));
        }
        let frame = std::mem::take(&mut *self.pending.lock().unwrap());
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }

    fn discard(&self) {
        self.pending.lock().unwrap().clear();
    }
}
