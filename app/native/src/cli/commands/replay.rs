//! Replay CLI command.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::ForesightError;
use crate::overview::OverviewSettings;
use crate::replay::{self, ReplayReport, ReplayScript};
use crate::shell::OverviewCommand;

/// Formats a command list for the timeline table.
fn format_commands(commands: &[OverviewCommand]) -> String {
    if commands.is_empty() {
        return String::new();
    }
    commands
        .iter()
        .map(|command| match command {
            OverviewCommand::Show(view) => {
                let view = serde_json::to_value(view)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                format!("show ({view})")
            }
            OverviewCommand::Hide => "hide".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_report(report: &ReplayReport) {
    #[derive(Tabled)]
    struct StepRow {
        #[tabled(rename = "Step")]
        step: String,
        #[tabled(rename = "At (ms)")]
        at_ms: u64,
        #[tabled(rename = "Action")]
        action: &'static str,
        #[tabled(rename = "Overview")]
        commands: String,
    }

    let rows: Vec<StepRow> = report
        .timeline
        .iter()
        .map(|entry| StepRow {
            step: entry.step.map_or_else(|| "-".to_string(), |index| (index + 1).to_string()),
            at_ms: entry.at_ms,
            action: entry.action,
            commands: format_commands(&entry.commands).green().to_string(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..2)).with(Alignment::right()))
        .to_string();

    println!("{}", "Timeline".bold());
    println!("{table}");

    let state = report.status.controller.map_or_else(
        || "disabled".dimmed().to_string(),
        |snapshot| format!("{:?}", snapshot.state),
    );
    println!(
        "{} {} show, {} hide; final state: {state}",
        "Overview:".bold(),
        report.show_count(),
        report.hide_count()
    );
}

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or the runtime
/// cannot be started.
pub fn execute(file: &Path, settings: Arc<OverviewSettings>, json: bool) -> Result<(), ForesightError> {
    let script = ReplayScript::from_path(file)?;
    tracing::debug!(
        path = %file.display(),
        steps = script.steps.len(),
        "foresight: replaying scenario"
    );

    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let report = runtime.block_on(replay::run(&script, settings))?;

    if json {
        output::print_highlighted_json(&serde_json::to_value(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
