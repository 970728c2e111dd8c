//! Notifications delivered by the host shell.

use serde::{Deserialize, Serialize};

use super::platform::{Signal, WorkspaceId};
use super::window::Window;

/// A shell signal emission, as delivered to a connected handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellEvent {
    /// The active workspace changed.
    WorkspaceSwitched { from: WorkspaceId, to: WorkspaceId },

    /// A window appeared on `workspace`.
    WindowAdded { workspace: WorkspaceId, window: Window },

    /// A window left `workspace` (closed or moved away).
    WindowRemoved { workspace: WorkspaceId, window: Window },

    /// The overview was dismissed, by the user or by anyone else.
    OverviewHidden,

    /// The app-grid toggle changed.
    AppGridToggled { checked: bool },
}

impl ShellEvent {
    /// Returns the signal this event was emitted for.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        match self {
            Self::WorkspaceSwitched { .. } => Signal::WorkspaceSwitched,
            Self::WindowAdded { .. } => Signal::WindowAdded,
            Self::WindowRemoved { .. } => Signal::WindowRemoved,
            Self::OverviewHidden => Signal::OverviewHidden,
            Self::AppGridToggled { .. } => Signal::AppGridToggled,
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str { self.signal().name() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_signal_mapping() {
        let window = Window::new(1, "Terminal");

        assert_eq!(
            ShellEvent::WorkspaceSwitched { from: 0, to: 1 }.signal(),
            Signal::WorkspaceSwitched
        );
        assert_eq!(
            ShellEvent::WindowAdded { workspace: 0, window: window.clone() }.signal(),
            Signal::WindowAdded
        );
        assert_eq!(
            ShellEvent::WindowRemoved { workspace: 0, window }.signal(),
            Signal::WindowRemoved
        );
        assert_eq!(ShellEvent::OverviewHidden.name(), "hidden");
        assert_eq!(ShellEvent::AppGridToggled { checked: true }.name(), "notify::checked");
    }
}
