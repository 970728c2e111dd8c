//! Foresight - opens the workspace overview when a workspace runs out of
//! windows, and closes it again when a window shows up.
//!
//! The library is a pure behaviour layer over a host shell:
//!
//! - [`shell`] describes what Foresight consumes from the shell
//!   ([`shell::ShellPlatform`]) and what the shell reports back
//!   ([`shell::ShellEvent`]), plus an in-memory [`shell::SimulatedShell`].
//! - [`overview`] holds the controller state machine and its actor.
//! - [`extension`] is the enable/disable lifecycle the host drives.
//! - [`config`] loads the JSONC configuration.
//! - [`replay`] runs scripted scenarios against the simulated shell.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extension;
pub mod logging;
pub mod overview;
pub mod replay;
pub mod shell;

pub use error::ForesightError;
pub use extension::{Extension, ExtensionStatus};
