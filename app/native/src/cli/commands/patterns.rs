//! Patterns CLI command.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::ForesightError;
use crate::overview::{OverviewSettings, TemporaryWindowPattern, TitlePattern};

/// Serializable view of one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternEntry {
    /// 1-based position in match order.
    pub index: usize,
    /// `exact` or `regex`.
    pub kind: &'static str,
    /// Title text or expression.
    pub title: String,
    /// Expected `WM_CLASS`.
    pub wm_class: Option<String>,
    /// Sandboxed application id.
    pub app_id: String,
}

impl PatternEntry {
    fn new(index: usize, pattern: &TemporaryWindowPattern) -> Self {
        let kind = match pattern.title {
            TitlePattern::Exact(_) => "exact",
            TitlePattern::Regex(_) => "regex",
        };
        Self {
            index: index + 1,
            kind,
            title: pattern.title.as_str().to_string(),
            wm_class: pattern.wm_class.clone(),
            app_id: pattern.app_id.clone(),
        }
    }
}

/// Lists the effective patterns in match order.
#[must_use]
pub fn entries(settings: &OverviewSettings) -> Vec<PatternEntry> {
    settings.patterns.iter().enumerate().map(|(index, p)| PatternEntry::new(index, p)).collect()
}

/// Execute the patterns command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(settings: &OverviewSettings, json: bool) -> Result<(), ForesightError> {
    #[derive(Tabled)]
    struct PatternRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Match")]
        kind: &'static str,
        #[tabled(rename = "WM_CLASS")]
        wm_class: String,
        #[tabled(rename = "App ID")]
        app_id: String,
    }

    let entries = entries(settings);

    if json {
        output::print_highlighted_json(&serde_json::to_value(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No temporary window patterns.".dimmed());
        return Ok(());
    }

    let count = entries.len();
    let rows: Vec<PatternRow> = entries
        .into_iter()
        .map(|entry| PatternRow {
            index: entry.index,
            title: output::truncate(&entry.title, 48),
            kind: entry.kind,
            wm_class: entry.wm_class.unwrap_or_else(|| "-".to_string()),
            app_id: entry.app_id,
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();

    let strict = if settings.patterns.strict_app_id() { "strict" } else { "wildcard" };
    println!("{}", format!("Temporary window patterns ({count}, app id {strict})").bold());
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ForesightConfig, TemporaryWindowRule};

    #[test]
    fn test_entries_list_builtins_in_order() {
        let entries = entries(&OverviewSettings::default());

        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].title, "Steam");
        assert_eq!(entries[0].kind, "exact");
        assert!(entries[0].wm_class.is_none());
        assert!(entries.iter().any(|e| e.kind == "regex"));
    }

    #[test]
    fn test_entries_include_configured_rules_last() {
        let config = ForesightConfig {
            temporary_windows: vec![TemporaryWindowRule {
                title_regex: Some("^Loading".to_string()),
                app_id: "org.example.App".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let settings = OverviewSettings::from_config(&config).unwrap();
        let entries = entries(&settings);

        let last = entries.last().unwrap();
        assert_eq!(last.index, entries.len());
        assert_eq!(last.kind, "regex");
        assert_eq!(last.app_id, "org.example.App");
    }

    #[test]
    fn test_entry_serialization() {
        let entries = entries(&OverviewSettings::default());
        let json = serde_json::to_value(&entries[0]).unwrap();

        assert_eq!(json["appId"], "com.valvesoftware.Steam");
        assert_eq!(json["wmClass"], serde_json::Value::Null);
    }
}
