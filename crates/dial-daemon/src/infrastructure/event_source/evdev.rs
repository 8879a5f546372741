//! OS-input source over a grabbed `/dev/input/eventN` node.
//!
//! The kernel HID driver exposes the dials as a relative-axis device: the
//! left dial on `REL_WHEEL`, the right dial on `REL_HWHEEL`.  The device is
//! grabbed (`EVIOCGRAB`) on open so those wheel events reach only this
//! daemon; closing the handle releases the grab.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::{Path, PathBuf};
use std::time::Duration;

use dial_core::decode_input_event;
use evdev::Device;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use tracing::trace;

use super::poll_timeout;
use crate::application::session::{DialBackend, DialHandle, ReadOutcome, SourceError};
use crate::infrastructure::locator::EvdevLocator;

/// Grabbed-evdev backend.
pub struct EvdevBackend {
    locator: EvdevLocator,
    heartbeat: Duration,
}

impl EvdevBackend {
    pub fn new(locator: EvdevLocator, heartbeat: Duration) -> Self {
        Self { locator, heartbeat }
    }
}

impl DialBackend for EvdevBackend {
    type Handle = EvdevHandle;

    fn name(&self) -> &'static str {
        "evdev"
    }

    fn locate(&self) -> Option<PathBuf> {
        self.locator.locate()
    }

    fn open(&self, path: &Path) -> Result<Self::Handle, SourceError> {
        let mut device = Device::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        device.grab().map_err(|source| SourceError::Grab {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(EvdevHandle {
            device,
            heartbeat: self.heartbeat,
        })
    }
}

/// An open, grabbed evdev device.
pub struct EvdevHandle {
    device: Device,
    heartbeat: Duration,
}

impl EvdevHandle {
    fn wait_readable(&self) -> Result<bool, io::Error> {
        // SAFETY: the fd is owned by `self.device`, which outlives this borrow.
        let fd = unsafe { BorrowedFd::borrow_raw(self.device.as_raw_fd()) };
        let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
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

impl DialHandle for EvdevHandle {
    fn read_turns(&mut self) -> ReadOutcome {
        match self.wait_readable() {
            Ok(true) => {}
            Ok(false) => return ReadOutcome::Idle,
            Err(e) => return ReadOutcome::Disconnected(e),
        }

        match self.device.fetch_events() {
            Ok(events) => ReadOutcome::Turns(
                events
                    .filter_map(|ev| {
                        trace!(kind = ev.event_type().0, code = ev.code(), value = ev.value());
                        decode_input_event(ev.event_type().0, ev.code(), ev.value())
                    })
                    .collect(),
            ),
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
                ReadOutcome::Idle
            }
            Err(e) => ReadOutcome::Disconnected(e),
        }
    }
}
