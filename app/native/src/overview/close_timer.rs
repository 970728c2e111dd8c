//! Close-animation debounce.
//!
//! When a window is destroyed the shell keeps animating it for a short
//! while. Re-evaluating the workspace right away would flash the overview
//! over that animation, so the decision is deferred until the animation is
//! over.
//!
//! [`CloseTimer`] is a single deadline slot. Scheduling replaces whatever
//! was pending, cancelling empties the slot, and the owning task learns
//! about expiry by awaiting [`CloseTimer::elapsed`]. Because the slot is
//! only touched from that task, a cancelled deadline can never fire.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::AnimationTimings;
use crate::shell::{Window, WorkspaceId};

/// Returns how long to wait after `window` was removed before re-evaluating.
#[must_use]
pub fn close_animation_delay(
    window: &Window,
    animations_enabled: bool,
    timings: &AnimationTimings,
) -> Duration {
    if !animations_enabled {
        return Duration::ZERO;
    }

    let millis = if window.window_type.is_dialog() {
        timings.dialog_close_ms
    } else {
        timings.normal_close_ms
    };
    Duration::from_millis(millis)
}

/// A scheduled re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClose {
    /// Workspace the closed window belonged to.
    pub workspace: WorkspaceId,
    /// Delay requested when scheduling.
    pub delay: Duration,
    deadline: Instant,
}

impl PendingClose {
    /// Returns when the re-evaluation is due.
    #[must_use]
    pub const fn deadline(&self) -> Instant { self.deadline }
}

/// At-most-one pending close re-evaluation.
#[derive(Debug, Default)]
pub struct CloseTimer {
    pending: Option<PendingClose>,
}

impl CloseTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self { Self { pending: None } }

    /// Schedules a re-evaluation of `workspace` after `delay`.
    ///
    /// Any pending re-evaluation is discarded; it is returned for logging.
    pub fn schedule(&mut self, workspace: WorkspaceId, delay: Duration) -> Option<PendingClose> {
        let pending = PendingClose { workspace, delay, deadline: Instant::now() + delay };
        let replaced = self.pending.replace(pending);
        if let Some(old) = replaced {
            tracing::trace!(
                workspace = old.workspace,
                delay_ms = old.delay.as_millis(),
                "foresight: pending close re-evaluation replaced"
            );
        }
        replaced
    }

    /// Cancels the pending re-evaluation.
    ///
    /// Returns `true` if something was pending. Cancelling an idle timer is a
    /// no-op.
    pub fn cancel(&mut self) -> bool { self.pending.take().is_some() }

    /// Returns the pending re-evaluation, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingClose> { self.pending.as_ref() }

    /// Returns `true` if a re-evaluation is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool { self.pending.is_some() }

    /// Takes the pending re-evaluation if its deadline has passed at `now`.
    pub fn take_expired(&mut self, now: Instant) -> Option<PendingClose> {
        match self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Waits for the pending re-evaluation to come due and takes it.
    ///
    /// Never resolves while nothing is pending. Cancel safe: dropping the
    /// future leaves the slot untouched.
    pub async fn elapsed(&mut self) -> PendingClose {
        let Some(deadline) = self.pending.map(|pending| pending.deadline) else {
            return std::future::pending().await;
        };

        tokio::time::sleep_until(deadline).await;

        match self.pending.take() {
            Some(pending) => pending,
            None => std::future::pending().await,
        }
    }
}
