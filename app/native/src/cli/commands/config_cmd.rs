//! Config CLI commands.
//!
//! Shows the effective configuration and where it is looked up.

use std::path::Path;

use colored::Colorize;

use crate::cli::output;
use crate::config::{ForesightConfig, config_paths};
use crate::error::ForesightError;

/// Print the effective configuration as highlighted JSON.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn show_config(config: &ForesightConfig, source: Option<&Path>) -> Result<(), ForesightError> {
    match source {
        Some(path) => eprintln!("{} {}", "Loaded from".dimmed(), path.display()),
        None => eprintln!("{}", "No configuration file found, showing defaults.".dimmed()),
    }

    output::print_highlighted_json(&serde_json::to_value(config)?);
    Ok(())
}

/// Show the configuration file search paths.
pub fn show_config_paths() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;

    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)"
        } else if exists {
            " (exists)"
        } else {
            ""
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found_config {
        println!("\nNo configuration file found. Defaults are in effect.");
    }
}
