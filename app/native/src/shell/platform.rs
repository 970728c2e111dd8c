//! Capability surface of the host shell.
//!
//! Foresight never reaches into shell internals. Everything it needs from
//! the window manager, compositor, settings and overview UI goes through
//! [`ShellPlatform`], which the host implements and injects at construction.

use std::rc::Rc;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::window::Window;

/// Index of a workspace in the shell's workspace directory.
pub type WorkspaceId = u32;

/// Opaque handle returned by [`ShellPlatform::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionToken(pub u64);

/// Object a signal is connected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalSource {
    /// The workspace directory (emits workspace switches).
    WorkspaceManager,
    /// A single workspace (emits window additions and removals).
    Workspace(WorkspaceId),
    /// The overview UI.
    Overview,
    /// The app-grid toggle of the overview dash.
    AppGridControl,
}

/// Signals Foresight subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    /// The active workspace changed.
    WorkspaceSwitched,
    /// A window was added to a workspace.
    WindowAdded,
    /// A window was removed from a workspace.
    WindowRemoved,
    /// The overview finished hiding.
    OverviewHidden,
    /// The app-grid toggle changed its checked state.
    AppGridToggled,
}

impl Signal {
    /// Returns the shell-side signal name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WorkspaceSwitched => "workspace-switched",
            Self::WindowAdded => "window-added",
            Self::WindowRemoved => "window-removed",
            Self::OverviewHidden => "hidden",
            Self::AppGridToggled => "notify::checked",
        }
    }
}

/// Page the overview opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OverviewView {
    /// The application grid.
    Applications,
    /// The window picker.
    #[default]
    Windows,
}

/// Everything Foresight consumes from the host shell.
///
/// Methods take `&self`; implementations keep their own interior
/// mutability, the same way the shell's objects are shared handles.
///
/// [`ShellPlatform::disconnect`] must accept tokens that are unknown or
/// already released and treat them as a no-op.
pub trait ShellPlatform {
    /// Returns the index of the active workspace.
    fn active_workspace(&self) -> WorkspaceId;

    /// Lists the windows currently on `workspace`.
    fn list_windows(&self, workspace: WorkspaceId) -> Vec<Window>;

    /// Connects to `signal` on `source`.
    fn connect(&self, source: SignalSource, signal: Signal) -> SubscriptionToken;

    /// Releases a connection made by [`ShellPlatform::connect`].
    fn disconnect(&self, token: SubscriptionToken);

    /// Opens the overview on the given page.
    fn show_overview(&self, view: OverviewView);

    /// Closes the overview.
    fn hide_overview(&self);

    /// Returns whether the overview is visible (or animating in).
    fn is_overview_visible(&self) -> bool;

    /// Returns whether the app-grid toggle is checked.
    fn is_app_grid_checked(&self) -> bool;

    /// Returns whether the shell animates windows.
    fn animations_enabled(&self) -> bool;

    /// Returns whether workspaces only span the primary monitor.
    fn workspaces_only_on_primary(&self) -> bool;
}

macro_rules! forward_shell_platform {
    ($($ptr:ty),+) => {$(
        impl<T: ShellPlatform + ?Sized> ShellPlatform for $ptr {
            fn active_workspace(&self) -> WorkspaceId { (**self).active_workspace() }

            fn list_windows(&self, workspace: WorkspaceId) -> Vec<Window> {
                (**self).list_windows(workspace)
            }

            fn connect(&self, source: SignalSource, signal: Signal) -> SubscriptionToken {
                (**self).connect(source, signal)
            }

            fn disconnect(&self, token: SubscriptionToken) { (**self).disconnect(token); }

            fn show_overview(&self, view: OverviewView) { (**self).show_overview(view); }

            fn hide_overview(&self) { (**self).hide_overview(); }

            fn is_overview_visible(&self) -> bool { (**self).is_overview_visible() }

            fn is_app_grid_checked(&self) -> bool { (**self).is_app_grid_checked() }

            fn animations_enabled(&self) -> bool { (**self).animations_enabled() }

            fn workspaces_only_on_primary(&self) -> bool { (**self).workspaces_only_on_primary() }
        }
    )+};
}

forward_shell_platform!(&T, Rc<T>, Arc<T>, Box<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(Signal::WorkspaceSwitched.name(), "workspace-switched");
        assert_eq!(Signal::WindowAdded.name(), "window-added");
        assert_eq!(Signal::WindowRemoved.name(), "window-removed");
        assert_eq!(Signal::OverviewHidden.name(), "hidden");
        assert_eq!(Signal::AppGridToggled.name(), "notify::checked");
    }

    #[test]
    fn test_overview_view_serde() {
        let view: OverviewView = serde_json::from_str(r#""windows""#).unwrap();
        assert_eq!(view, OverviewView::Windows);
        assert_eq!(OverviewView::default(), OverviewView::Windows);
    }
}
