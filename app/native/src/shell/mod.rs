//! Host shell abstraction.
//!
//! Foresight is a leaf behaviour layer: the shell's window manager, overview
//! and settings are external collaborators reached through [`ShellPlatform`],
//! and the shell reports back through [`ShellEvent`]s.
//!
//! [`SimulatedShell`] is a complete in-memory implementation used by the
//! `replay` command and the tests.

pub mod events;
pub mod platform;
pub mod simulated;
pub mod window;

pub use events::ShellEvent;
pub use platform::{
    OverviewView, ShellPlatform, Signal, SignalSource, SubscriptionToken, WorkspaceId,
};
pub use simulated::{EventSink, OverviewCommand, SimulatedShell};
pub use window::{Window, WindowId, WindowType};
