//! Extension lifecycle.
//!
//! The host enables and disables Foresight as a unit. Each enable creates a
//! fresh [`OverviewController`]; each disable tears it down and drops it, so
//! nothing survives from one enabled session to the next.

use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;

use crate::overview::{ControllerSnapshot, OverviewController, OverviewSettings, PendingClose};
use crate::shell::{ShellEvent, ShellPlatform};

/// Enabled state of the extension, for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionStatus {
    /// Whether a controller is live.
    pub enabled: bool,
    /// Snapshot of the live controller.
    pub controller: Option<ControllerSnapshot>,
}

/// Owns at most one live controller.
pub struct Extension<P: ShellPlatform + Clone> {
    platform: P,
    settings: Arc<OverviewSettings>,
    controller: Option<OverviewController<P>>,
}

impl<P: ShellPlatform + Clone> Extension<P> {
    /// Creates a disabled extension.
    #[must_use]
    pub const fn new(platform: P, settings: Arc<OverviewSettings>) -> Self {
        Self { platform, settings, controller: None }
    }

    /// Creates a controller and connects it to the shell.
    ///
    /// Returns `false` if the extension was already enabled, in which case
    /// nothing changes.
    pub fn enable(&mut self) -> bool {
        if self.controller.is_some() {
            tracing::warn!("foresight: enable called while already enabled, ignoring");
            return false;
        }

        self.controller =
            Some(OverviewController::new(self.platform.clone(), Arc::clone(&self.settings)));
        tracing::info!("foresight: enabled");
        true
    }

    /// Tears the controller down and drops it.
    ///
    /// Returns `false` if the extension was not enabled. Calling this any
    /// number of times is safe.
    pub fn disable(&mut self) -> bool {
        let Some(mut controller) = self.controller.take() else {
            tracing::debug!("foresight: disable called while disabled, ignoring");
            return false;
        };

        controller.teardown();
        tracing::info!("foresight: disabled");
        true
    }

    /// Returns `true` while a controller is live.
    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.controller.is_some() }

    /// Returns the live controller.
    #[must_use]
    pub const fn controller(&self) -> Option<&OverviewController<P>> { self.controller.as_ref() }

    /// Returns the shell platform.
    #[must_use]
    pub const fn platform(&self) -> &P { &self.platform }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> ExtensionStatus {
        ExtensionStatus {
            enabled: self.is_enabled(),
            controller: self.controller.as_ref().map(OverviewController::snapshot),
        }
    }

    /// Forwards a shell notification to the live controller.
    ///
    /// Notifications that arrive while disabled are dropped.
    pub fn handle_event(&mut self, event: ShellEvent) {
        match self.controller.as_mut() {
            Some(controller) => controller.handle_event(event),
            None => tracing::trace!(event = event.name(), "foresight: disabled, dropping event"),
        }
    }

    /// Waits until the live controller's close re-evaluation is due.
    ///
    /// Never resolves while disabled or while nothing is pending. Cancel safe.
    pub async fn close_timer_elapsed(&mut self) -> PendingClose {
        match self.controller.as_mut() {
            Some(controller) => controller.close_timer_elapsed().await,
            None => std::future::pending().await,
        }
    }

    /// Runs a re-evaluation obtained from [`Self::close_timer_elapsed`].
    pub fn on_close_timer_elapsed(&mut self, pending: PendingClose) {
        if let Some(controller) = self.controller.as_mut() {
            controller.on_close_timer_elapsed(pending);
        }
    }

    /// Runs the close re-evaluation if it is due at `now`.
    pub fn fire_expired_close(&mut self, now: Instant) -> bool {
        self.controller.as_mut().is_some_and(|controller| controller.fire_expired_close(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::shell::{OverviewCommand, OverviewView, SimulatedShell, Window};

    fn extension(shell: &Arc<SimulatedShell>) -> Extension<Arc<SimulatedShell>> {
        Extension::new(Arc::clone(shell), Arc::new(OverviewSettings::default()))
    }

    #[test]
    fn test_starts_disabled() {
        let shell = Arc::new(SimulatedShell::new(1));
        let ext = extension(&shell);

        assert!(!ext.is_enabled());
        assert_eq!(ext.status(), ExtensionStatus { enabled: false, controller: None });
        assert_eq!(shell.connection_count(), 0);
    }

    #[test]
    fn test_enable_twice_keeps_one_controller() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);

        assert!(ext.enable());
        assert!(!ext.enable());

        assert_eq!(shell.connection_count(), 5);
    }

    #[test]
    fn test_disable_twice_is_safe() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);
        assert!(!ext.disable());

        ext.enable();
        assert!(ext.disable());
        assert!(!ext.disable());

        assert_eq!(shell.connection_count(), 0);
    }

    #[test]
    fn test_alternating_enable_disable_leaks_nothing() {
        let shell = Arc::new(SimulatedShell::new(3));
        let mut ext = extension(&shell);

        for round in 0..10 {
            ext.enable();
            assert_eq!(shell.connection_count(), 5, "round {round}");
            ext.disable();
            assert_eq!(shell.connection_count(), 0, "round {round}");
        }
    }

    #[test]
    fn test_disable_cancels_pending_close() {
        let shell = Arc::new(SimulatedShell::new(1));
        shell.seed_window(0, Window::new(1, "Editor"));
        let mut ext = extension(&shell);
        ext.enable();

        ext.handle_event(ShellEvent::WindowRemoved { workspace: 0, window: Window::new(1, "Editor") });
        assert!(ext.status().controller.is_some_and(|c| c.pending_close_ms == Some(150)));

        ext.disable();
        ext.enable();

        assert!(!ext.fire_expired_close(Instant::now() + Duration::from_secs(60)));
        assert!(shell.commands().is_empty());
    }

    #[test]
    fn test_events_dropped_while_disabled() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);

        ext.handle_event(ShellEvent::WindowRemoved { workspace: 0, window: Window::new(1, "Editor") });
        assert!(!ext.fire_expired_close(Instant::now() + Duration::from_secs(60)));
        assert!(shell.commands().is_empty());
    }

    #[test]
    fn test_enable_does_not_evaluate_immediately() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);

        ext.enable();

        assert!(shell.commands().is_empty());
        assert!(!shell.is_overview_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_timer_elapsed_runs_reevaluation() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);
        ext.enable();
        ext.handle_event(ShellEvent::WindowRemoved { workspace: 0, window: Window::new(1, "Editor") });

        let start = Instant::now();
        let pending = ext.close_timer_elapsed().await;
        ext.on_close_timer_elapsed(pending);

        assert_eq!(start.elapsed(), Duration::from_millis(150));
        assert_eq!(shell.commands(), vec![OverviewCommand::Show(OverviewView::Windows)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_timer_elapsed_pends_while_disabled() {
        let shell = Arc::new(SimulatedShell::new(1));
        let mut ext = extension(&shell);

        let result = tokio::time::timeout(Duration::from_secs(5), ext.close_timer_elapsed()).await;
        assert!(result.is_err());
    }
}
