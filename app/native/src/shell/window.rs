//! Window snapshots as reported by the host shell.
//!
//! The shell owns the real window objects. Foresight only ever sees a
//! snapshot of the attributes it needs to classify a window: its type,
//! visibility, title, class, sandboxed app id and monitor placement.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of a window, unique for the lifetime of the shell session.
pub type WindowId = u64;

/// Window type as reported by the window manager.
///
/// Only [`WindowType::Normal`], [`WindowType::Dialog`] and
/// [`WindowType::ModalDialog`] count as user-facing windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    /// Regular top-level application window.
    #[default]
    Normal,
    /// Non-modal dialog.
    Dialog,
    /// Modal dialog attached to a parent window.
    ModalDialog,
    /// Desktop background window.
    Desktop,
    /// Dock or panel.
    Dock,
    /// Torn-off toolbar.
    Toolbar,
    /// Torn-off menu.
    Menu,
    /// Utility window (palette, toolbox).
    Utility,
    /// Splash screen shown while an application starts.
    Splashscreen,
    /// Dropdown menu.
    DropdownMenu,
    /// Popup menu.
    PopupMenu,
    /// Tooltip.
    Tooltip,
    /// Notification bubble.
    Notification,
    /// Combo box popup.
    Combo,
    /// Drag and drop icon.
    Dnd,
    /// Override-redirect window of unknown purpose.
    OverrideOther,
}

impl WindowType {
    /// Returns `true` for the window types that represent real user work.
    #[must_use]
    pub const fn is_user_facing(self) -> bool {
        matches!(self, Self::Normal | Self::Dialog | Self::ModalDialog)
    }

    /// Returns `true` for dialog-like windows, which use the shorter
    /// destroy animation.
    #[must_use]
    pub const fn is_dialog(self) -> bool { matches!(self, Self::Dialog | Self::ModalDialog) }
}

/// Snapshot of a window's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    /// Shell-assigned window identifier.
    pub id: WindowId,

    /// Window type.
    #[serde(default, rename = "type")]
    pub window_type: WindowType,

    /// Whether the window is currently hidden (minimized or not yet mapped).
    #[serde(default)]
    pub hidden: bool,

    /// Window title.
    #[serde(default)]
    pub title: String,

    /// `WM_CLASS` of the window, if the client set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wm_class: Option<String>,

    /// Sandboxed application identifier (e.g. a Flatpak app id), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandboxed_app_id: Option<String>,

    /// Whether the window sits on the primary monitor.
    #[serde(default = "default_on_primary")]
    pub on_primary_monitor: bool,
}

const fn default_on_primary() -> bool { true }

impl Window {
    /// Creates a visible normal window on the primary monitor.
    #[must_use]
    pub fn new(id: WindowId, title: impl Into<String>) -> Self {
        Self {
            id,
            window_type: WindowType::Normal,
            hidden: false,
            title: title.into(),
            wm_class: None,
            sandboxed_app_id: None,
            on_primary_monitor: true,
        }
    }

    /// Sets the window type.
    #[must_use]
    pub const fn with_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Sets the hidden flag.
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets the `WM_CLASS`.
    #[must_use]
    pub fn with_wm_class(mut self, wm_class: impl Into<String>) -> Self {
        self.wm_class = Some(wm_class.into());
        self
    }

    /// Sets the sandboxed application id.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.sandboxed_app_id = Some(app_id.into());
        self
    }

    /// Sets whether the window is on the primary monitor.
    #[must_use]
    pub const fn with_primary_monitor(mut self, on_primary_monitor: bool) -> Self {
        self.on_primary_monitor = on_primary_monitor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_types() {
        assert!(WindowType::Normal.is_user_facing());
        assert!(WindowType::Dialog.is_user_facing());
        assert!(WindowType::ModalDialog.is_user_facing());
        assert!(!WindowType::Splashscreen.is_user_facing());
        assert!(!WindowType::Tooltip.is_user_facing());
        assert!(!WindowType::Dock.is_user_facing());
    }

    #[test]
    fn test_dialog_types() {
        assert!(!WindowType::Normal.is_dialog());
        assert!(WindowType::Dialog.is_dialog());
        assert!(WindowType::ModalDialog.is_dialog());
    }

    #[test]
    fn test_window_deserialize_defaults() {
        let window: Window = serde_json::from_str(r#"{ "id": 7, "title": "Files" }"#).unwrap();

        assert_eq!(window.window_type, WindowType::Normal);
        assert!(!window.hidden);
        assert!(window.on_primary_monitor);
        assert!(window.wm_class.is_none());
        assert!(window.sandboxed_app_id.is_none());
    }

    #[test]
    fn test_window_deserialize_full() {
        let json = r#"{
            "id": 3,
            "type": "modal-dialog",
            "hidden": true,
            "title": "Sign in",
            "wmClass": "steam",
            "sandboxedAppId": "com.valvesoftware.Steam",
            "onPrimaryMonitor": false
        }"#;
        let window: Window = serde_json::from_str(json).unwrap();

        assert_eq!(window.window_type, WindowType::ModalDialog);
        assert!(window.hidden);
        assert_eq!(window.wm_class.as_deref(), Some("steam"));
        assert_eq!(window.sandboxed_app_id.as_deref(), Some("com.valvesoftware.Steam"));
        assert!(!window.on_primary_monitor);
    }
}
