//! Configuration types for Foresight.
//!
//! The configuration file is JSONC (JSON with comments). Every field is
//! optional; a missing file yields [`ForesightConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::timing::{DESTROY_WINDOW_ANIMATION_MS, DIALOG_DESTROY_WINDOW_ANIMATION_MS};
use crate::shell::OverviewView;

/// Configuration file names searched inside a config directory.
const CONFIG_FILE_NAMES: [&str; 2] = ["config.jsonc", "config.json"];

/// Legacy dotfile names searched in the home directory.
const LEGACY_CONFIG_FILE_NAMES: [&str; 2] = [".foresight.jsonc", ".foresight.json"];

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "no configuration file found (expected ~/.config/foresight/config.jsonc or ~/.foresight.jsonc)"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A temporary window rule is malformed.
    #[error("invalid temporary window rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },
}

/// Which overview the controller dismisses when a real window appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WindowAddedPolicy {
    /// Dismiss any visible overview, whoever opened it.
    #[default]
    Always,
    /// Only dismiss an overview Foresight opened itself.
    ShownByUs,
}

/// Where the temporary-window filter applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TemporaryFilter {
    /// Filter window events and workspace emptiness checks alike.
    #[default]
    Everywhere,
    /// Filter window events only; emptiness checks count every valid window.
    EventsOnly,
}

/// Destroy-animation durations of the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationTimings {
    /// Close animation of normal windows, in milliseconds.
    /// Default: 150
    pub normal_close_ms: u64,

    /// Close animation of dialogs and modal dialogs, in milliseconds.
    /// Default: 100
    pub dialog_close_ms: u64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            normal_close_ms: DESTROY_WINDOW_ANIMATION_MS,
            dialog_close_ms: DIALOG_DESTROY_WINDOW_ANIMATION_MS,
        }
    }
}

/// A user-defined temporary window rule.
///
/// Exactly one of `title` and `titleRegex` must be set. `appId` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TemporaryWindowRule {
    /// Exact window title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Regular expression matched against the window title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_regex: Option<String>,

    /// Exact `WM_CLASS`. Absent means the window must have no class either.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wm_class: Option<String>,

    /// Sandboxed application id.
    pub app_id: String,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ForesightConfig {
    /// JSON schema reference, ignored.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Overview page opened when a workspace becomes empty.
    /// Default: "windows"
    pub overview_view: OverviewView,

    /// Close-animation delays.
    pub animation: AnimationTimings,

    /// Which overview a new window dismisses.
    /// Default: "always"
    pub window_added_policy: WindowAddedPolicy,

    /// Scope of the temporary-window filter.
    /// Default: "everywhere"
    pub temporary_filter: TemporaryFilter,

    /// Require the window's app id to be present and equal when matching
    /// temporary window rules.
    /// Default: false
    pub strict_app_id_match: bool,

    /// Never auto-show the overview on the first workspace.
    /// Default: false
    pub keep_first_workspace_quiet: bool,

    /// Extra temporary window rules, checked after the built-in ones.
    pub temporary_windows: Vec<TemporaryWindowRule>,
}

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/foresight/config.jsonc` or `config.json`
/// 2. `~/.config/foresight/config.jsonc` or `config.json`
/// 3. the platform config directory (`dirs::config_dir`)
/// 4. `~/.foresight.jsonc` or `~/.foresight.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_dir(&PathBuf::from(xdg_config).join("foresight"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(&home.join(".config").join("foresight"), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(&config_dir.join("foresight"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Appends the config file names inside `dir`, skipping duplicates.
fn push_dir(dir: &Path, paths: &mut Vec<PathBuf>) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Loads the configuration from the first existing file in [`config_paths`].
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no file exists, or an I/O or parse
/// error for the first file found.
pub fn load_config() -> Result<(ForesightConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path).map(|config| (config, path));
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<ForesightConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ForesightConfig::default();

        assert_eq!(config.overview_view, OverviewView::Windows);
        assert_eq!(config.animation.normal_close_ms, 150);
        assert_eq!(config.animation.dialog_close_ms, 100);
        assert_eq!(config.window_added_policy, WindowAddedPolicy::Always);
        assert_eq!(config.temporary_filter, TemporaryFilter::Everywhere);
        assert!(!config.strict_app_id_match);
        assert!(!config.keep_first_workspace_quiet);
        assert!(config.temporary_windows.is_empty());
    }

    #[test]
    fn test_load_jsonc_with_comments() {
        let file = write_config(
            r#"{
                // open the app grid instead of the window picker
                "overviewView": "applications",
                /* slower shell */
                "animation": { "normalCloseMs": 250 },
                "windowAddedPolicy": "shown-by-us",
                "temporaryFilter": "events-only",
                "strictAppIdMatch": true,
                "temporaryWindows": [
                    { "titleRegex": "^Updating .*$", "wmClass": "zoom", "appId": "us.zoom.Zoom" }
                ]
            }"#,
        );

        let config = load_config_from_path(file.path()).unwrap();

        assert_eq!(config.overview_view, OverviewView::Applications);
        assert_eq!(config.animation.normal_close_ms, 250);
        assert_eq!(config.animation.dialog_close_ms, 100);
        assert_eq!(config.window_added_policy, WindowAddedPolicy::ShownByUs);
        assert_eq!(config.temporary_filter, TemporaryFilter::EventsOnly);
        assert!(config.strict_app_id_match);
        assert_eq!(config.temporary_windows.len(), 1);
        assert_eq!(config.temporary_windows[0].app_id, "us.zoom.Zoom");
        assert!(config.temporary_windows[0].title.is_none());
    }

    #[test]
    fn test_load_empty_object() {
        let file = write_config("{}");
        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config, ForesightConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{ \"overviewView\": ");
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("nope.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_paths_end_with_legacy_files() {
        if dirs::home_dir().is_none() {
            return;
        }
        let paths = config_paths();
        let names: Vec<_> =
            paths.iter().filter_map(|p| p.file_name().and_then(|n| n.to_str())).collect();
        assert!(names.contains(&"config.jsonc"));
        assert!(names.last().is_some_and(|n| n.starts_with(".foresight")));
    }

    #[test]
    fn test_invalid_rule_error_display() {
        let err = ConfigError::InvalidRule { index: 2, reason: "missing title".to_string() };
        assert_eq!(err.to_string(), "invalid temporary window rule #2: missing title");
    }
}
