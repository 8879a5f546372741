//! DialSession: the device lifecycle state machine.
//!
//! ```text
//!            locate() == None (wait search_interval)
//!              ┌──────┐
//!              ▼      │
//!  ┌──────► Searching ┘
//!  │           │ locate() == Some(path)
//!  │           ▼
//!  │       Connected ──── open failed (wait error_pause) ────► Searching
//!  │           │    └──── grab failed ──► Backoff(d) ── wait d ─► Searching
//!  │           ▼ open ok
//!  │        Polling ◄──┐ turns dispatched / idle heartbeat
//!  │           │ └─────┘
//!  └───────────┘ disconnected (drop handle, wait error_pause)
//! ```
//!
//! There is no terminal state: every failure after startup leads back to
//! `Searching`.  The handle lives inside the `Polling` variant, so leaving
//! `Polling` drops it and at most one device handle is ever open.
//!
//! # Backends
//!
//! The two hardware modes (raw `hidraw` reports and a grabbed evdev device)
//! are two [`DialBackend`] implementations.  Each one knows how to find its
//! device node and how to open it; the handle it returns turns whatever the
//! node delivers into [`DialTurnEvent`]s.  The session itself never sees raw
//! bytes.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dial_core::DialTurnEvent;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use super::dispatch::DispatchActionUseCase;

/// Longest uninterrupted sleep; shutdown is noticed within this slice.
const PAUSE_SLICE: Duration = Duration::from_millis(250);

/// Error type for opening a dial source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The device node could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The device was opened but the exclusive grab was refused, usually
    /// because another process holds it.
    #[error("failed to grab {path}: {source}")]
    Grab {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of one wait-and-read on an open dial source.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Data arrived.  The vector holds the decoded turns in arrival order and
    /// is empty when the data was short, foreign, or undecodable.
    Turns(Vec<DialTurnEvent>),
    /// The heartbeat timeout elapsed and the device is still present.
    Idle,
    /// The device is gone or the read failed.
    Disconnected(io::Error),
}

/// An open connection to one dial source.
pub trait DialHandle {
    /// Waits (bounded by the backend's heartbeat) for the next data and
    /// decodes it.
    fn read_turns(&mut self) -> ReadOutcome;
}

/// One hardware integration mode: how to find and open the dial source.
pub trait DialBackend {
    type Handle: DialHandle;

    /// Short mode name for log lines.
    fn name(&self) -> &'static str;

    /// Returns the current device node path, if the device is present.
    fn locate(&self) -> Option<PathBuf>;

    /// Opens the device node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the node cannot be opened and
    /// [`SourceError::Grab`] if exclusive access is refused.
    fn open(&self, path: &Path) -> Result<Self::Handle, SourceError>;
}

/// Timing of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wait between device searches while the device is absent.
    pub search_interval: Duration,
    /// Wait after an open failure or a disconnect.
    pub error_pause: Duration,
    /// First wait after a refused grab.
    pub grab_backoff_initial: Duration,
    /// Upper bound for the doubling grab backoff.
    pub grab_backoff_max: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_interval: Duration::from_secs(3),
            error_pause: Duration::from_secs(2),
            grab_backoff_initial: Duration::from_secs(1),
            grab_backoff_max: Duration::from_secs(30),
        }
    }
}

/// Session state; the handle is owned by the `Polling` variant.
enum SessionState<H> {
    Searching,
    Connected(PathBuf),
    Polling { path: PathBuf, handle: H },
    Backoff(Duration),
}

/// Observable name of the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Searching,
    Connected,
    Polling,
    Backoff,
}

/// The device lifecycle loop.
pub struct DialSession<B: DialBackend> {
    backend: B,
    dispatcher: DispatchActionUseCase,
    config: SessionConfig,
    running: Arc<AtomicBool>,
    state: SessionState<B::Handle>,
    next_backoff: Duration,
}

impl<B: DialBackend> DialSession<B> {
    /// Creates a session in the `Searching` state.
    pub fn new(
        backend: B,
        dispatcher: DispatchActionUseCase,
        config: SessionConfig,
        running: Arc<AtomicBool>,
    ) -> Self {
        let next_backoff = config.grab_backoff_initial;
        Self {
            backend,
            dispatcher,
            config,
            running,
            state: SessionState::Searching,
            next_backoff,
        }
    }

    /// Returns the current state name.
    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Searching => SessionPhase::Searching,
            SessionState::Connected(_) => SessionPhase::Connected,
            SessionState::Polling { .. } => SessionPhase::Polling,
            SessionState::Backoff(_) => SessionPhase::Backoff,
        }
    }

    /// Returns the path of the open device, if any.
    pub fn device_path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::Polling { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the backend (for inspection in tests and diagnostics).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs the state machine until the `running` flag is cleared.
    ///
    /// Clearing the flag closes any open handle before returning.
    pub fn run(&mut self) {
        info!(mode = self.backend.name(), "dial session started");
        while self.running.load(Ordering::Relaxed) {
            self.step();
        }
        // Dropping the handle releases any exclusive grab.
        self.state = SessionState::Searching;
        info!("dial session stopped");
    }

    /// Performs exactly one state transition.
    pub fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Searching);
        self.state = match state {
            SessionState::Searching => self.search(),
            SessionState::Connected(path) => self.connect(path),
            SessionState::Polling { path, handle } => self.poll(path, handle),
            SessionState::Backoff(wait) => {
                self.pause(wait);
                SessionState::Searching
            }
        };
    }

    fn search(&mut self) -> SessionState<B::Handle> {
        match self.backend.locate() {
            Some(path) => {
                debug!("found dial device at {}", path.display());
                SessionState::Connected(path)
            }
            None => {
                trace!("dial device not present; retrying in {:?}", self.config.search_interval);
                self.pause(self.config.search_interval);
                SessionState::Searching
            }
        }
    }

    fn connect(&mut self, path: PathBuf) -> SessionState<B::Handle> {
        match self.backend.open(&path) {
            Ok(handle) => {
                self.next_backoff = self.config.grab_backoff_initial;
                info!(mode = self.backend.name(), "monitoring {}", path.display());
                SessionState::Polling { path, handle }
            }
            Err(e @ SourceError::Grab { .. }) => {
                let wait = self.next_backoff;
                self.next_backoff = (wait * 2).min(self.config.grab_backoff_max);
                warn!("{e}; retrying in {wait:?}");
                SessionState::Backoff(wait)
            }
            Err(e @ SourceError::Open { .. }) => {
                warn!("{e}");
                self.pause(self.config.error_pause);
                SessionState::Searching
            }
        }
    }

    fn poll(&mut self, path: PathBuf, mut handle: B::Handle) -> SessionState<B::Handle> {
        match handle.read_turns() {
            ReadOutcome::Turns(turns) => {
                for turn in turns {
                    self.dispatcher.dispatch(turn);
                }
                SessionState::Polling { path, handle }
            }
            ReadOutcome::Idle => SessionState::Polling { path, handle },
            ReadOutcome::Disconnected(err) => {
                drop(handle);
                warn!("dial device {} disconnected: {err}", path.display());
                self.pause(self.config.error_pause);
                SessionState::Searching
            }
        }
    }

    /// Sleeps for `wait`, waking early if the session is asked to stop.
    fn pause(&self, wait: Duration) {
        let deadline = Instant::now() + wait;
        while self.running.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep((deadline - now).min(PAUSE_SLICE));
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
