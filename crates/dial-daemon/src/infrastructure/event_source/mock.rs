//! Scripted dial backend for session tests.
//!
//! Each call to `open` pops the next scripted result.  A successful open
//! yields a [`MockDialHandle`] that replays its scripted reads and reports
//! `Disconnected` once the script runs out.
//!
//! # Usage in tests
//!
//! ```ignore
//! let backend = MockDialBackend::present("/dev/hidraw3")
//!     .with_open(Ok(vec![ReadOutcome::Turns(vec![turn])]));
//! let mut session = DialSession::new(backend, dispatcher, config, running);
//! session.step();
//! assert_eq!(session.backend().locate_calls(), 1);
//! ```

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::session::{DialBackend, DialHandle, ReadOutcome, SourceError};

/// A backend whose device presence and open results are scripted.
#[derive(Default)]
pub struct MockDialBackend {
    path: Option<PathBuf>,
    opens: Mutex<VecDeque<Result<Vec<ReadOutcome>, SourceError>>>,
    locate_calls: AtomicUsize,
    open_calls: AtomicUsize,
}

impl MockDialBackend {
    /// A backend whose device is never found.
    pub fn absent() -> Self {
        Self::default()
    }

    /// A backend whose device is always found at `path`.
    pub fn present(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Appends one scripted `open` result.
    pub fn with_open(self, result: Result<Vec<ReadOutcome>, SourceError>) -> Self {
        self.opens.lock().unwrap().push_back(result);
        self
    }

    pub fn locate_calls(&self) -> usize {
        self.locate_calls.load(Ordering::Relaxed)
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::Relaxed)
    }
}

impl DialBackend for MockDialBackend {
    type Handle = MockDialHandle;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn locate(&self) -> Option<PathBuf> {
        self.locate_calls.fetch_add(1, Ordering::Relaxed);
        self.path.clone()
    }

    fn open(&self, path: &Path) -> Result<Self::Handle, SourceError> {
        self.open_calls.fetch_add(1, Ordering::Relaxed);
        match self.opens.lock().unwrap().pop_front() {
            Some(Ok(reads)) => Ok(MockDialHandle {
                reads: reads.into(),
            }),
            Some(Err(e)) => Err(e),
            None => Err(SourceError::Open {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

/// Handle replaying scripted reads.
pub struct MockDialHandle {
    reads: VecDeque<ReadOutcome>,
}

impl DialHandle for MockDialHandle {
    fn read_turns(&mut self) -> ReadOutcome {
        self.reads.pop_front().unwrap_or_else(|| {
            ReadOutcome::Disconnected(io::Error::new(io::ErrorKind::NotFound, "script exhausted"))
        })
    }
}
