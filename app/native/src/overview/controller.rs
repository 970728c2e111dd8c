//! Workspace overview controller.
//!
//! Watches the current workspace and opens the overview when its last real
//! window closes, and dismisses it again when a real window appears.
//!
//! # States
//!
//! ```text
//!                last window closed (after close animation)
//!                switched to an empty workspace
//!        ┌──────┐ ─────────────────────────────────────▶ ┌───────────┐
//!        │ Idle │                                         │ ShownByUs │
//!        └──────┘ ◀───────────────────────────────────── └───────────┘
//!                real window added, overview hidden,
//!                switched to an occupied workspace
//! ```
//!
//! The controller only ever dismisses an overview from `ShownByUs` on a
//! workspace switch, so an overview the user opened on purpose stays open.

use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;

use super::classifier::{is_valid_window, workspace_has_valid_windows};
use super::close_timer::{CloseTimer, PendingClose, close_animation_delay};
use super::settings::OverviewSettings;
use super::subscriptions::{SubscriptionSet, WorkspaceSubscription};
use crate::config::{TemporaryFilter, WindowAddedPolicy};
use crate::shell::{ShellEvent, ShellPlatform, Signal, SignalSource, Window, WorkspaceId};

/// Whether the overview is open because of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverviewState {
    /// The controller has not opened the overview.
    #[default]
    Idle,
    /// The controller opened the overview and it has not been dismissed since.
    ShownByUs,
}

/// Point-in-time view of a controller, for queries and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    /// Current state.
    pub state: OverviewState,
    /// Workspace whose window signals are held.
    pub workspace: Option<WorkspaceId>,
    /// Delay of the pending close re-evaluation, in milliseconds.
    pub pending_close_ms: Option<u64>,
    /// Number of live signal connections.
    pub connections: usize,
}

/// The overview state machine for one enabled session.
pub struct OverviewController<P: ShellPlatform> {
    platform: P,
    settings: Arc<OverviewSettings>,
    workspace: WorkspaceSubscription,
    global_signals: SubscriptionSet,
    close_timer: CloseTimer,
    state: OverviewState,
}

impl<P: ShellPlatform> OverviewController<P> {
    /// Creates a controller and connects it to the shell.
    ///
    /// Subscribes to the active workspace's window signals plus the
    /// workspace-switched, overview-hidden and app-grid signals.
    pub fn new(platform: P, settings: Arc<OverviewSettings>) -> Self {
        let mut controller = Self {
            platform,
            settings,
            workspace: WorkspaceSubscription::new(),
            global_signals: SubscriptionSet::new(),
            close_timer: CloseTimer::new(),
            state: OverviewState::Idle,
        };

        let active = controller.platform.active_workspace();
        controller.workspace.switch_to(&controller.platform, active);

        for (source, signal) in [
            (SignalSource::WorkspaceManager, Signal::WorkspaceSwitched),
            (SignalSource::Overview, Signal::OverviewHidden),
            (SignalSource::AppGridControl, Signal::AppGridToggled),
        ] {
            controller.global_signals.connect(&controller.platform, source, signal);
        }

        tracing::debug!(workspace = active, "foresight: controller connected");
        controller
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> OverviewState { self.state }

    /// Returns the workspace being tracked.
    #[must_use]
    pub const fn workspace(&self) -> Option<WorkspaceId> { self.workspace.workspace() }

    /// Returns the pending close re-evaluation, if any.
    #[must_use]
    pub const fn pending_close(&self) -> Option<&PendingClose> { self.close_timer.pending() }

    /// Returns the shell platform.
    #[must_use]
    pub const fn platform(&self) -> &P { &self.platform }

    /// Returns a snapshot of the controller.
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state,
            workspace: self.workspace.workspace(),
            pending_close_ms: self
                .close_timer
                .pending()
                .map(|p| u64::try_from(p.delay.as_millis()).unwrap_or(u64::MAX)),
            connections: self.workspace.len() + self.global_signals.len(),
        }
    }

    // ========================================================================
    // Event dispatch
    // ========================================================================

    /// Handles one shell notification.
    pub fn handle_event(&mut self, event: ShellEvent) {
        tracing::trace!(event = event.name(), "foresight: handling event");

        match event {
            ShellEvent::WorkspaceSwitched { from, to } => self.on_workspace_switched(from, to),
            ShellEvent::WindowAdded { workspace, window } => self.on_window_added(workspace, &window),
            ShellEvent::WindowRemoved { workspace, window } => {
                self.on_window_removed(workspace, &window);
            }
            ShellEvent::OverviewHidden => self.on_overview_hidden(),
            ShellEvent::AppGridToggled { checked } => self.on_app_grid_toggled(checked),
        }
    }

    /// Waits until the pending close re-evaluation is due and takes it.
    ///
    /// Never resolves while nothing is pending. Cancel safe.
    pub async fn close_timer_elapsed(&mut self) -> PendingClose { self.close_timer.elapsed().await }

    /// Runs the close re-evaluation if it is due at `now`.
    ///
    /// For hosts that poll instead of awaiting [`Self::close_timer_elapsed`].
    /// Returns `true` if a re-evaluation ran.
    pub fn fire_expired_close(&mut self, now: Instant) -> bool {
        self.close_timer.take_expired(now).is_some_and(|pending| {
            self.on_close_timer_elapsed(pending);
            true
        })
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    fn on_workspace_switched(&mut self, from: WorkspaceId, to: WorkspaceId) {
        let active = self.platform.active_workspace();
        if active != to {
            tracing::trace!(to, active, "foresight: switch target is no longer active");
        }

        if self.close_timer.cancel() {
            tracing::debug!(from, "foresight: workspace switched, dropping pending close re-evaluation");
        }

        self.workspace.switch_to(&self.platform, active);

        let occupied = self.has_real_windows(active) || !self.settings.may_auto_show(active);
        if occupied && !self.platform.is_app_grid_checked() {
            if self.state == OverviewState::ShownByUs {
                tracing::debug!(workspace = active, "foresight: switched to occupied workspace, hiding overview");
                self.hide_overview();
            }
        } else if !self.platform.is_overview_visible() {
            self.show_if_empty(active);
        }
    }

    fn on_window_added(&mut self, workspace: WorkspaceId, window: &Window) {
        if !self.workspace.is_current(workspace) {
            tracing::trace!(workspace, window = window.id, "foresight: ignoring window added to stale workspace");
            return;
        }

        if !self.is_real_window(window, true) {
            tracing::trace!(window = window.id, title = %window.title, "foresight: ignoring added window");
            return;
        }

        if self.close_timer.cancel() {
            tracing::debug!(window = window.id, "foresight: window added, dropping pending close re-evaluation");
        }

        if !self.platform.is_overview_visible() {
            return;
        }

        let dismiss = match self.settings.window_added_policy {
            WindowAddedPolicy::Always => true,
            WindowAddedPolicy::ShownByUs => self.state == OverviewState::ShownByUs,
        };

        if dismiss {
            tracing::debug!(window = window.id, "foresight: window added, hiding overview");
            self.hide_overview();
        }
    }

    fn on_window_removed(&mut self, workspace: WorkspaceId, window: &Window) {
        if !self.workspace.is_current(workspace) {
            tracing::trace!(workspace, window = window.id, "foresight: ignoring window removed from stale workspace");
            return;
        }

        if !self.is_real_window(window, false) {
            tracing::trace!(window = window.id, title = %window.title, "foresight: ignoring removed window");
            return;
        }

        let delay = close_animation_delay(window, self.platform.animations_enabled(), &self.settings.timings);
        tracing::debug!(
            window = window.id,
            delay_ms = delay.as_millis(),
            "foresight: window removed, re-evaluating after close animation"
        );
        self.close_timer.schedule(workspace, delay);
    }

    fn on_overview_hidden(&mut self) {
        if self.state == OverviewState::ShownByUs {
            tracing::debug!("foresight: overview hidden, no longer tracking it");
        }
        self.state = OverviewState::Idle;
    }

    fn on_app_grid_toggled(&mut self, checked: bool) {
        if !checked && self.state == OverviewState::ShownByUs {
            tracing::debug!("foresight: app grid left, user took over the overview");
            self.state = OverviewState::Idle;
        }
    }

    /// Re-evaluates the workspace once the close animation is over.
    pub fn on_close_timer_elapsed(&mut self, pending: PendingClose) {
        if !self.workspace.is_current(pending.workspace) {
            tracing::trace!(workspace = pending.workspace, "foresight: close re-evaluation for stale workspace");
            return;
        }
        self.show_if_empty(pending.workspace);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn only_on_primary(&self) -> bool { self.platform.workspaces_only_on_primary() }

    /// Valid and not a known temporary window.
    fn is_real_window(&self, window: &Window, being_added: bool) -> bool {
        is_valid_window(window, being_added, self.only_on_primary())
            && !self.settings.patterns.is_temporary(window)
    }

    fn has_real_windows(&self, workspace: WorkspaceId) -> bool {
        match self.settings.temporary_filter {
            TemporaryFilter::EventsOnly => workspace_has_valid_windows(&self.platform, workspace),
            TemporaryFilter::Everywhere => self
                .platform
                .list_windows(workspace)
                .iter()
                .any(|window| self.is_real_window(window, false)),
        }
    }

    fn show_if_empty(&mut self, workspace: WorkspaceId) -> bool {
        if !self.settings.may_auto_show(workspace) || self.has_real_windows(workspace) {
            return false;
        }

        tracing::debug!(workspace, "foresight: workspace is empty, showing overview");
        self.platform.show_overview(self.settings.overview_view);
        self.state = OverviewState::ShownByUs;
        true
    }

    fn hide_overview(&mut self) {
        self.state = OverviewState::Idle;
        self.platform.hide_overview();
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Cancels the pending re-evaluation and releases every connection.
    ///
    /// Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.close_timer.cancel() {
            tracing::trace!("foresight: teardown cancelled pending close re-evaluation");
        }
        self.workspace.release(&self.platform);
        self.global_signals.release_all(&self.platform);
        self.state = OverviewState::Idle;
    }
}

impl<P: ShellPlatform> Drop for OverviewController<P> {
    fn drop(&mut self) { self.teardown(); }
}
