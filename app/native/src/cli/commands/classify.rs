//! Classify CLI command.
//!
//! Runs one described window through the classifier and the temporary
//! window patterns, the same checks the controller applies to window events.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::ForesightError;
use crate::overview::{OverviewSettings, is_valid_window};
use crate::shell::{Window, WindowType};

/// Arguments describing the window to classify.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Window title.
    #[arg(long)]
    pub title: String,

    /// `WM_CLASS` of the window.
    #[arg(long, value_name = "CLASS")]
    pub wm_class: Option<String>,

    /// Sandboxed application id.
    #[arg(long, value_name = "ID")]
    pub app_id: Option<String>,

    /// Window type (normal, dialog, modal-dialog, utility, ...).
    #[arg(long = "type", value_name = "TYPE", default_value = "normal", value_parser = parse_window_type)]
    pub window_type: WindowType,

    /// The window is hidden.
    #[arg(long)]
    pub hidden: bool,

    /// Classify as a window being added rather than removed.
    #[arg(long)]
    pub adding: bool,

    /// The window sits off the primary monitor.
    #[arg(long)]
    pub secondary_monitor: bool,

    /// Workspaces only span the primary monitor.
    #[arg(long)]
    pub only_on_primary: bool,

    /// Output in JSON format.
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl ClassifyArgs {
    /// Builds the window snapshot the arguments describe.
    #[must_use]
    pub fn to_window(&self) -> Window {
        Window {
            id: 0,
            window_type: self.window_type,
            hidden: self.hidden,
            title: self.title.clone(),
            wm_class: self.wm_class.clone(),
            sandboxed_app_id: self.app_id.clone(),
            on_primary_monitor: !self.secondary_monitor,
        }
    }
}

/// Parses a window type from its kebab-case name.
fn parse_window_type(value: &str) -> Result<WindowType, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("Invalid window type '{value}'."))
}

/// Verdict for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Passes the type, visibility and monitor checks.
    pub valid: bool,
    /// Index of the first matching temporary window pattern.
    pub temporary_pattern: Option<usize>,
    /// Counts as a real window for the overview.
    pub real: bool,
}

/// Classifies `window` with the given settings.
#[must_use]
pub fn classify(
    window: &Window,
    being_added: bool,
    only_on_primary: bool,
    settings: &OverviewSettings,
) -> Classification {
    let valid = is_valid_window(window, being_added, only_on_primary);
    let temporary_pattern = settings.patterns.matching(window).map(|(index, _)| index);
    Classification { valid, temporary_pattern, real: valid && temporary_pattern.is_none() }
}

/// Execute the classify command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ClassifyArgs, settings: &OverviewSettings) -> Result<(), ForesightError> {
    #[derive(Tabled)]
    struct CheckRow {
        #[tabled(rename = "Check")]
        check: &'static str,
        #[tabled(rename = "Result")]
        result: String,
    }

    let window = args.to_window();
    let verdict = classify(&window, args.adding, args.only_on_primary, settings);

    if args.json {
        let value = serde_json::json!({ "window": window, "classification": verdict });
        output::print_highlighted_json(&value);
        return Ok(());
    }

    let pattern = verdict
        .temporary_pattern
        .and_then(|index| settings.patterns.iter().nth(index).map(|p| (index, p)))
        .map_or_else(
            || "none".dimmed().to_string(),
            |(index, p)| format!("#{} {}", index + 1, output::truncate(p.title.as_str(), 40)),
        );

    let rows = vec![
        CheckRow { check: "User-facing type", result: output::format_bool(window.window_type.is_user_facing()) },
        CheckRow { check: "Valid window", result: output::format_bool(verdict.valid) },
        CheckRow { check: "Temporary pattern", result: pattern },
        CheckRow { check: "Counts as real", result: output::format_bool(verdict.real) },
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Window \"{}\"", output::truncate(&window.title, 60)).bold());
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OverviewSettings { OverviewSettings::default() }

    #[test]
    fn test_parse_window_type() {
        assert_eq!(parse_window_type("dialog").unwrap(), WindowType::Dialog);
        assert_eq!(parse_window_type("override-other").unwrap(), WindowType::OverrideOther);
        assert!(parse_window_type("Dialog").is_err());
    }

    #[test]
    fn test_classify_regular_window() {
        let verdict = classify(&Window::new(1, "Editor"), false, false, &settings());
        assert_eq!(verdict, Classification { valid: true, temporary_pattern: None, real: true });
    }

    #[test]
    fn test_classify_steam_bootstrapper() {
        let window = Window::new(1, "Steam").with_app_id("com.valvesoftware.Steam");
        let verdict = classify(&window, true, false, &settings());

        assert!(verdict.valid);
        assert_eq!(verdict.temporary_pattern, Some(0));
        assert!(!verdict.real);
    }

    #[test]
    fn test_classify_hidden_window_depends_on_direction() {
        let window = Window::new(1, "Terminal").with_hidden(true);
        assert!(classify(&window, true, false, &settings()).real);
        assert!(!classify(&window, false, false, &settings()).real);
    }

    #[test]
    fn test_to_window_maps_monitor_flag() {
        let args = ClassifyArgs {
            title: "Browser".to_string(),
            wm_class: None,
            app_id: None,
            window_type: WindowType::Normal,
            hidden: false,
            adding: false,
            secondary_monitor: true,
            only_on_primary: true,
            json: false,
        };
        let window = args.to_window();

        assert!(!window.on_primary_monitor);
        assert!(!classify(&window, false, args.only_on_primary, &settings()).valid);
    }
}
