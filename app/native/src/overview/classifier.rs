//! Window classification.
//!
//! Decides which windows count as real user work for the purpose of
//! opening or dismissing the overview.

use crate::shell::{ShellPlatform, Window, WorkspaceId};

/// Returns `true` if the window counts as a user-facing window.
///
/// A window is rejected when:
/// - its type is not normal, dialog or modal dialog
/// - it is hidden, unless `being_added` is set (windows created through
///   keyboard shortcuts may briefly report themselves hidden)
/// - it is off the primary monitor while workspaces are restricted to the
///   primary monitor
#[must_use]
pub fn is_valid_window(window: &Window, being_added: bool, only_on_primary: bool) -> bool {
    if !window.window_type.is_user_facing() {
        return false;
    }

    if window.hidden && !being_added {
        return false;
    }

    if only_on_primary && !window.on_primary_monitor {
        return false;
    }

    true
}

/// Returns `true` if `workspace` holds at least one valid window.
///
/// The temporary-window filter is not applied here.
#[must_use]
pub fn workspace_has_valid_windows<P: ShellPlatform + ?Sized>(
    platform: &P,
    workspace: WorkspaceId,
) -> bool {
    let only_on_primary = platform.workspaces_only_on_primary();
    platform
        .list_windows(workspace)
        .iter()
        .any(|window| is_valid_window(window, false, only_on_primary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{SimulatedShell, WindowType};

    const ALL_TYPES: [WindowType; 16] = [
        WindowType::Normal,
        WindowType::Dialog,
        WindowType::ModalDialog,
        WindowType::Desktop,
        WindowType::Dock,
        WindowType::Toolbar,
        WindowType::Menu,
        WindowType::Utility,
        WindowType::Splashscreen,
        WindowType::DropdownMenu,
        WindowType::PopupMenu,
        WindowType::Tooltip,
        WindowType::Notification,
        WindowType::Combo,
        WindowType::Dnd,
        WindowType::OverrideOther,
    ];

    #[test]
    fn test_non_user_facing_types_always_rejected() {
        for window_type in ALL_TYPES.into_iter().filter(|t| !t.is_user_facing()) {
            for hidden in [false, true] {
                for adding in [false, true] {
                    for restricted in [false, true] {
                        let window = Window::new(1, "x").with_type(window_type).with_hidden(hidden);
                        assert!(
                            !is_valid_window(&window, adding, restricted),
                            "{window_type:?} must be rejected"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_user_facing_types_accepted() {
        for window_type in [WindowType::Normal, WindowType::Dialog, WindowType::ModalDialog] {
            let window = Window::new(1, "x").with_type(window_type);
            assert!(is_valid_window(&window, false, false));
        }
    }

    #[test]
    fn test_hidden_window_rejected_unless_being_added() {
        let window = Window::new(1, "Terminal").with_hidden(true);

        assert!(!is_valid_window(&window, false, false));
        assert!(is_valid_window(&window, true, false));
    }

    #[test]
    fn test_secondary_monitor_only_matters_when_restricted() {
        let window = Window::new(1, "Browser").with_primary_monitor(false);

        assert!(is_valid_window(&window, false, false));
        assert!(!is_valid_window(&window, false, true));
        assert!(!is_valid_window(&window, true, true));
    }

    #[test]
    fn test_workspace_has_valid_windows() {
        let shell = SimulatedShell::new(2);
        shell.seed_window(0, Window::new(1, "Tooltip").with_type(WindowType::Tooltip));
        shell.seed_window(0, Window::new(2, "Minimized").with_hidden(true));
        assert!(!workspace_has_valid_windows(&shell, 0));

        shell.seed_window(0, Window::new(3, "Editor"));
        assert!(workspace_has_valid_windows(&shell, 0));
        assert!(!workspace_has_valid_windows(&shell, 1));
    }

    #[test]
    fn test_workspace_has_valid_windows_respects_primary_restriction() {
        let shell = SimulatedShell::new(1);
        shell.seed_window(0, Window::new(1, "Browser").with_primary_monitor(false));
        assert!(workspace_has_valid_windows(&shell, 0));

        shell.set_workspaces_only_on_primary(true);
        assert!(!workspace_has_valid_windows(&shell, 0));
    }

    #[test]
    fn test_temporary_windows_still_count() {
        let shell = SimulatedShell::new(1);
        shell.seed_window(0, Window::new(1, "Steam").with_app_id("com.valvesoftware.Steam"));
        assert!(workspace_has_valid_windows(&shell, 0));
    }
}
