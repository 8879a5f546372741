//! DispatchActionUseCase: performs the action bound to a turned dial.
//!
//! This use case sits at the application layer and delegates to a
//! [`VirtualOutput`] trait object for synthetic input and a
//! [`BacklightControl`] trait object for brightness.  The OS-specific
//! implementations live in the infrastructure layer.
//!
//! # Frame discipline
//!
//! Every key tap or axis step is emitted as one input frame: the individual
//! events are queued with `emit_key` / `emit_relative` and published
//! together by `commit`.  A consumer therefore never observes a modifier
//! pressed without the scroll step that goes with it.

use std::sync::Arc;

use dial_core::{
    ActionProfile, DialBindings, DialTurnEvent, KeyCode, RelAxis, RotationDirection,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for synthetic input output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("uinput write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Synthetic input device the daemon writes key and axis events to.
///
/// Implementations queue events until [`commit`](Self::commit), which
/// publishes everything queued so far as one input frame.
pub trait VirtualOutput: Send + Sync {
    /// Queues a key press (`pressed = true`) or release.
    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), OutputError>;

    /// Queues a relative axis movement.
    fn emit_relative(&self, axis: RelAxis, amount: i32) -> Result<(), OutputError>;

    /// Publishes the queued events as one frame.
    fn commit(&self) -> Result<(), OutputError>;

    /// Drops everything queued since the last commit.
    fn discard(&self);
}

/// Display brightness control.
///
/// Brightness is best-effort: implementations log their own failures and
/// never report them to the caller.
pub trait BacklightControl: Send + Sync {
    /// Steps the brightness up (clockwise) or down by `step_percent` of the
    /// maximum.
    fn adjust(&self, direction: RotationDirection, step_percent: u8);
}

/// The Dispatch Action use case.
///
/// Holds the immutable bindings chosen at startup and the two output
/// collaborators.
pub struct DispatchActionUseCase {
    bindings: Arc<DialBindings>,
    output: Arc<dyn VirtualOutput>,
    backlight: Arc<dyn BacklightControl>,
}

impl DispatchActionUseCase {
    pub fn new(
        bindings: Arc<DialBindings>,
        output: Arc<dyn VirtualOutput>,
        backlight: Arc<dyn BacklightControl>,
    ) -> Self {
        Self {
            bindings,
            output,
            backlight,
        }
    }

    /// Performs the action bound to `event.identity`.
    ///
    /// Output failures are logged and swallowed; a failed action never stops
    /// the caller's loop.
    pub fn dispatch(&self, event: DialTurnEvent) {
        if let Err(e) = self.try_dispatch(event) {
            warn!(
                dial = %event.identity,
                direction = %event.direction,
                "dial action failed: {e}"
            );
        }
    }

    /// Performs the action bound to `event.identity`, returning output errors.
    ///
    /// A failed action leaves nothing queued on the output, so a modifier
    /// press can never leak into the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the virtual output rejects an event or the
    /// commit.
    pub fn try_dispatch(&self, event: DialTurnEvent) -> Result<(), OutputError> {
        let direction = event.direction;
        let profile = self.bindings.profile(event.identity);
        debug!(dial = %event.identity, %direction, ?profile, "dispatching dial turn");

        if let ActionProfile::Backlight { step_percent } = *profile {
            self.backlight.adjust(direction, step_percent);
            return Ok(());
        }

        let result = self.emit_frame(profile, direction);
        if result.is_err() {
            self.output.discard();
        }
        result
    }

    /// Queues the events for one key tap or axis step and commits them.
    fn emit_frame(
        &self,
        profile: &ActionProfile,
        direction: RotationDirection,
    ) -> Result<(), OutputError> {
        if let Some(key) = profile.key_for(direction) {
            self.output.emit_key(key, true)?;
            self.output.emit_key(key, false)?;
        }
        if let (ActionProfile::RelativeAxis { axis, modifier, .. }, Some(amount)) =
            (profile, profile.relative_amount(direction))
        {
            if let Some(m) = *modifier {
                self.output.emit_key(m, true)?;
            }
            self.output.emit_relative(*axis, amount)?;
            if let Some(m) = *modifier {
                self.output.emit_key(m, false)?;
            }
        }
        self.output.commit()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
