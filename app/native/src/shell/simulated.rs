//! In-memory shell used by the replay command and the test suites.
//!
//! `SimulatedShell` keeps a workspace directory, the overview state and a
//! connection table. Signals are only delivered when something is connected
//! to them, once per live connection, so leaked or duplicated subscriptions
//! show up as duplicated events exactly like they would in a real shell.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::events::ShellEvent;
use super::platform::{
    OverviewView, ShellPlatform, Signal, SignalSource, SubscriptionToken, WorkspaceId,
};
use super::window::{Window, WindowId};

/// Receiver of emitted shell events.
pub type EventSink = Arc<dyn Fn(ShellEvent) + Send + Sync>;

/// Overview command issued through [`ShellPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "command", content = "view")]
pub enum OverviewCommand {
    /// `show_overview` was called.
    Show(OverviewView),
    /// `hide_overview` was called.
    Hide,
}

#[derive(Debug)]
struct ShellState {
    workspaces: BTreeMap<WorkspaceId, Vec<Window>>,
    active: WorkspaceId,
    overview_visible: bool,
    app_grid_checked: bool,
    animations_enabled: bool,
    only_on_primary: bool,
    next_token: u64,
    connections: BTreeMap<SubscriptionToken, (SignalSource, Signal)>,
    commands: Vec<OverviewCommand>,
}

impl ShellState {
    /// Builds one event per live connection on `source` for the event's signal.
    fn fan_out(&self, source: SignalSource, event: &ShellEvent, out: &mut Vec<ShellEvent>) {
        let signal = event.signal();
        let listeners = self
            .connections
            .values()
            .filter(|(s, sig)| *s == source && *sig == signal)
            .count();
        out.extend(std::iter::repeat_n(event.clone(), listeners));
    }
}

/// An in-memory [`ShellPlatform`].
pub struct SimulatedShell {
    state: Mutex<ShellState>,
    sink: Mutex<Option<EventSink>>,
}

impl std::fmt::Debug for SimulatedShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedShell").field("state", &*self.state.lock()).finish_non_exhaustive()
    }
}

impl Default for SimulatedShell {
    fn default() -> Self { Self::new(1) }
}

impl SimulatedShell {
    /// Creates a shell with `workspace_count` empty workspaces, the first one active.
    #[must_use]
    pub fn new(workspace_count: u32) -> Self {
        let workspaces = (0..workspace_count.max(1)).map(|index| (index, Vec::new())).collect();

        Self {
            state: Mutex::new(ShellState {
                workspaces,
                active: 0,
                overview_visible: false,
                app_grid_checked: false,
                animations_enabled: true,
                only_on_primary: false,
                next_token: 1,
                connections: BTreeMap::new(),
                commands: Vec::new(),
            }),
            sink: Mutex::new(None),
        }
    }

    /// Sets where emitted events are delivered.
    ///
    /// Events are dropped while no sink is attached.
    pub fn attach_sink(&self, sink: EventSink) { *self.sink.lock() = Some(sink); }

    /// Detaches the event sink.
    pub fn detach_sink(&self) { *self.sink.lock() = None; }

    fn dispatch(&self, events: Vec<ShellEvent>) {
        if events.is_empty() {
            return;
        }
        let Some(sink) = self.sink.lock().clone() else {
            tracing::trace!(count = events.len(), "simulated shell: no sink attached, dropping events");
            return;
        };
        for event in events {
            sink(event);
        }
    }

    // ========================================================================
    // Host-side operations
    // ========================================================================

    /// Places a window on `workspace` without emitting anything.
    ///
    /// Used to seed the initial window set before Foresight is enabled.
    pub fn seed_window(&self, workspace: WorkspaceId, window: Window) {
        self.state.lock().workspaces.entry(workspace).or_default().push(window);
    }

    /// Opens a window on `workspace`.
    pub fn add_window(&self, workspace: WorkspaceId, window: Window) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock();
            state.workspaces.entry(workspace).or_default().push(window.clone());
            state.fan_out(
                SignalSource::Workspace(workspace),
                &ShellEvent::WindowAdded { workspace, window },
                &mut events,
            );
        }
        self.dispatch(events);
    }

    /// Closes a window on `workspace`, returning it if it existed.
    pub fn remove_window(&self, workspace: WorkspaceId, id: WindowId) -> Option<Window> {
        let mut events = Vec::new();
        let removed = {
            let mut state = self.state.lock();
            let windows = state.workspaces.get_mut(&workspace)?;
            let position = windows.iter().position(|w| w.id == id)?;
            let window = windows.remove(position);
            state.fan_out(
                SignalSource::Workspace(workspace),
                &ShellEvent::WindowRemoved { workspace, window: window.clone() },
                &mut events,
            );
            window
        };
        self.dispatch(events);
        Some(removed)
    }

    /// Makes `workspace` the active one.
    pub fn switch_workspace(&self, workspace: WorkspaceId) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock();
            state.workspaces.entry(workspace).or_default();
            let from = state.active;
            if from == workspace {
                return;
            }
            state.active = workspace;
            state.fan_out(
                SignalSource::WorkspaceManager,
                &ShellEvent::WorkspaceSwitched { from, to: workspace },
                &mut events,
            );
        }
        self.dispatch(events);
    }

    /// Opens the overview as the user would (no command is recorded).
    pub fn open_overview(&self, view: OverviewView) {
        let mut state = self.state.lock();
        state.overview_visible = true;
        state.app_grid_checked = view == OverviewView::Applications;
    }

    /// Dismisses the overview as the user would.
    pub fn close_overview(&self) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock();
            Self::hide_locked(&mut state, &mut events);
        }
        self.dispatch(events);
    }

    /// Toggles the app-grid control.
    pub fn set_app_grid_checked(&self, checked: bool) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock();
            if state.app_grid_checked == checked {
                return;
            }
            state.app_grid_checked = checked;
            state.fan_out(
                SignalSource::AppGridControl,
                &ShellEvent::AppGridToggled { checked },
                &mut events,
            );
        }
        self.dispatch(events);
    }

    /// Changes the global animation setting.
    pub fn set_animations_enabled(&self, enabled: bool) { self.state.lock().animations_enabled = enabled; }

    /// Changes the "workspaces only on primary monitor" setting.
    pub fn set_workspaces_only_on_primary(&self, enabled: bool) {
        self.state.lock().only_on_primary = enabled;
    }

    fn hide_locked(state: &mut ShellState, events: &mut Vec<ShellEvent>) {
        if !state.overview_visible {
            return;
        }
        state.overview_visible = false;
        state.app_grid_checked = false;
        state.fan_out(SignalSource::Overview, &ShellEvent::OverviewHidden, events);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns the overview commands issued so far.
    #[must_use]
    pub fn commands(&self) -> Vec<OverviewCommand> { self.state.lock().commands.clone() }

    /// Forgets the recorded overview commands.
    pub fn clear_commands(&self) { self.state.lock().commands.clear(); }

    /// Returns the number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize { self.state.lock().connections.len() }

    /// Returns the number of live connections on `source`.
    #[must_use]
    pub fn connections_on(&self, source: SignalSource) -> usize {
        self.state.lock().connections.values().filter(|(s, _)| *s == source).count()
    }

    /// Returns the number of workspaces.
    #[must_use]
    pub fn workspace_count(&self) -> usize { self.state.lock().workspaces.len() }
}

impl ShellPlatform for SimulatedShell {
    fn active_workspace(&self) -> WorkspaceId { self.state.lock().active }

    fn list_windows(&self, workspace: WorkspaceId) -> Vec<Window> {
        self.state.lock().workspaces.get(&workspace).cloned().unwrap_or_default()
    }

    fn connect(&self, source: SignalSource, signal: Signal) -> SubscriptionToken {
        let mut state = self.state.lock();
        let token = SubscriptionToken(state.next_token);
        state.next_token += 1;
        state.connections.insert(token, (source, signal));
        token
    }

    fn disconnect(&self, token: SubscriptionToken) {
        if self.state.lock().connections.remove(&token).is_none() {
            tracing::trace!(?token, "simulated shell: disconnect of unknown token ignored");
        }
    }

    fn show_overview(&self, view: OverviewView) {
        let mut state = self.state.lock();
        state.commands.push(OverviewCommand::Show(view));
        state.overview_visible = true;
        state.app_grid_checked = view == OverviewView::Applications;
    }

    fn hide_overview(&self) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock();
            state.commands.push(OverviewCommand::Hide);
            Self::hide_locked(&mut state, &mut events);
        }
        self.dispatch(events);
    }

    fn is_overview_visible(&self) -> bool { self.state.lock().overview_visible }

    fn is_app_grid_checked(&self) -> bool { self.state.lock().app_grid_checked }

    fn animations_enabled(&self) -> bool { self.state.lock().animations_enabled }

    fn workspaces_only_on_primary(&self) -> bool { self.state.lock().only_on_primary }
}
