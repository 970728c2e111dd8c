//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `classify` - Window classification verdicts
//! - `config_cmd` - Effective configuration and search paths
//! - `patterns` - Temporary window pattern listing
//! - `replay` - Scenario replay against the simulated shell

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::error::ForesightError;
use crate::overview::OverviewSettings;

pub mod classify;
pub mod config_cmd;
pub mod patterns;
pub mod replay;

pub use classify::ClassifyArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Foresight CLI - inspect and exercise the workspace overview behaviour.
#[derive(Parser, Debug)]
#[command(name = "foresight")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overrides `RUST_LOG`).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// List the temporary window patterns in effect.
    ///
    /// Shows the built-in launcher and updater patterns followed by the ones
    /// added in the configuration file.
    #[command(after_long_help = r#"Examples:
  foresight patterns          # Table of patterns
  foresight patterns --json   # Patterns as JSON"#)]
    Patterns {
        /// Output in JSON format instead of table format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Classify a single window.
    ///
    /// Reports whether the described window counts as a real window, and
    /// which temporary window pattern (if any) it matches.
    Classify(ClassifyArgs),

    /// Replay a scenario against a simulated shell.
    ///
    /// Runs a JSONC scenario through the real overview controller and prints
    /// the overview commands it issued.
    #[command(after_long_help = r#"Examples:
  foresight replay demos/close-last-window.jsonc
  foresight replay demos/close-last-window.jsonc --json"#)]
    Replay {
        /// Scenario file.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output in JSON format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Show the effective configuration.
    Config {
        /// List the configuration file search paths instead.
        #[arg(long)]
        paths: bool,
    },

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(foresight completions --shell zsh)"
    ///   foresight completions --shell fish > ~/.config/fish/completions/foresight.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> { self.config.as_deref() }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command
    /// fails.
    pub fn execute(&self) -> Result<(), ForesightError> {
        match &self.command {
            Commands::Patterns { json } => {
                let settings = self.load_settings()?;
                patterns::execute(&settings, *json)
            }
            Commands::Classify(args) => {
                let settings = self.load_settings()?;
                classify::execute(args, &settings)
            }
            Commands::Replay { file, json } => {
                let settings = self.load_settings()?;
                replay::execute(file, Arc::new(settings), *json)
            }
            Commands::Schema => {
                let schema = config::schema();
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(())
            }
            Commands::Config { paths } => {
                if *paths {
                    config_cmd::show_config_paths();
                    Ok(())
                } else {
                    let (config, source) = config::load(self.config_path())?;
                    config_cmd::show_config(&config, source.as_deref())
                }
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Loads the configuration and resolves controller settings from it.
    fn load_settings(&self) -> Result<OverviewSettings, ForesightError> {
        let (config, source) = config::load(self.config_path())?;
        if let Some(path) = source {
            tracing::debug!(path = %path.display(), "foresight: using configuration file");
        }
        Ok(OverviewSettings::from_config(&config)?)
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "foresight", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::WindowType;

    // ========================================================================
    // CLI parsing tests
    // ========================================================================

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["foresight", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_patterns_json() {
        let cli = Cli::try_parse_from(["foresight", "patterns", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Patterns { json: true }));
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli =
            Cli::try_parse_from(["foresight", "patterns", "-v", "--config", "/tmp/f.jsonc"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config_path(), Some(Path::new("/tmp/f.jsonc")));
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli = Cli::try_parse_from(["foresight", "replay", "demo.jsonc", "-j"]).unwrap();
        match cli.command {
            Commands::Replay { file, json } => {
                assert_eq!(file, PathBuf::from("demo.jsonc"));
                assert!(json);
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_cli_parses_classify() {
        let cli = Cli::try_parse_from([
            "foresight",
            "classify",
            "--title",
            "Steam",
            "--app-id",
            "com.valvesoftware.Steam",
            "--type",
            "modal-dialog",
            "--hidden",
            "--adding",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.title, "Steam");
                assert_eq!(args.window_type, WindowType::ModalDialog);
                assert!(args.hidden);
                assert!(args.adding);
                assert!(args.wm_class.is_none());
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_window_type() {
        let result = Cli::try_parse_from(["foresight", "classify", "--title", "x", "--type", "bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_config_paths() {
        let cli = Cli::try_parse_from(["foresight", "config", "--paths"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { paths: true }));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["foresight", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() { Cli::command().debug_assert(); }
}
