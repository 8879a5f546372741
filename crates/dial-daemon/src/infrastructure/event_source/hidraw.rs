//! Raw-report source over a `/dev/hidrawN` node.
//!
//! Each `read(2)` on a hidraw node returns exactly one report.  Reports too
//! short to decode, reports for other IDs, and the "no event" trigger are
//! dropped by [`decode_raw_report`] without disturbing the session.

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dial_core::decode_raw_report;
use dial_core::report::raw::MAX_REPORT_LEN;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use tracing::trace;

use super::poll_timeout;
use crate::application::session::{DialBackend, DialHandle, ReadOutcome, SourceError};
use crate::infrastructure::locator::HidrawLocator;

/// Raw-report backend.
pub struct HidrawBackend {
    locator: HidrawLocator,
    heartbeat: Duration,
}

impl HidrawBackend {
    pub fn new(locator: HidrawLocator, heartbeat: Duration) -> Self {
        Self { locator, heartbeat }
    }
}

impl DialBackend for HidrawBackend {
    type Handle = HidrawHandle;

    fn name(&self) -> &'static str {
        "hidraw"
    }

    fn locate(&self) -> Option<PathBuf> {
        self.locator.locate()
    }

    fn open(&self, path: &Path) -> Result<Self::Handle, SourceError> {
        HidrawHandle::open(path, self.heartbeat)
    }
}

/// An open hidraw node.
pub struct HidrawHandle {
    path: PathBuf,
    file: File,
    heartbeat: Duration,
    buf: [u8; MAX_REPORT_LEN],
}

impl HidrawHandle {
    /// Opens `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the node cannot be opened.
    pub fn open(path: &Path, heartbeat: Duration) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            heartbeat,
            buf: [0; MAX_REPORT_LEN],
        })
    }

    /// Waits up to one heartbeat for the node to become readable.
    fn wait_readable(&self) -> Result<bool, io::Error> {
        let mut fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];
        match poll(&mut fds, poll_timeout(self.heartbeat)) {
            Ok(0) | Err(Errno::EINTR) => Ok(false),
            Ok(_) => {
                let hung_up = fds[0].revents().is_some_and(|r| {
                    r.intersects(PollFlags::POLLHUP | PollFlags::POLLERR | PollFlags::POLLNVAL)
                });
                if hung_up {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device hang-up"));
                }
                Ok(true)
            }
            Err(errno) => Err(io::Error::from(errno)),
        }
    }
}

impl DialHandle for HidrawHandle {
    fn read_turns(&mut self) -> ReadOutcome {
        match self.wait_readable() {
            Ok(true) => {}
            Ok(false) => {
                // Heartbeat: the node vanishes from /dev when the device is unplugged.
                if !self.path.exists() {
                    return ReadOutcome::Disconnected(io::Error::new(
                        io::ErrorKind::NotFound,
                        "device node removed",
                    ));
                }
                return ReadOutcome::Idle;
            }
            Err(e) => return ReadOutcome::Disconnected(e),
        }

        match self.file.read(&mut self.buf) {
            Ok(n) => {
                trace!(len = n, "raw report");
                ReadOutcome::Turns(decode_raw_report(&self.buf[..n]).into_iter().collect())
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
                ReadOutcome::Idle
            }
            Err(e) => ReadOutcome::Disconnected(e),
        }
    }
}
