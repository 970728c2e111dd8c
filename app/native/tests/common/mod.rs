//! Shared helpers for the integration tests.
//!
//! A [`Session`] wires a [`SimulatedShell`] to a running overview actor, the
//! same way a host shell would. All tests run on a paused tokio clock, so
//! close-animation delays are exact.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use foresight_lib::config::ForesightConfig;
use foresight_lib::extension::{Extension, ExtensionStatus};
use foresight_lib::overview::{OverviewActor, OverviewHandle, OverviewSettings, OverviewState};
use foresight_lib::shell::{OverviewCommand, SimulatedShell};

/// A simulated shell with Foresight attached.
pub struct Session {
    pub shell: Arc<SimulatedShell>,
    pub handle: OverviewHandle,
}

impl Session {
    /// Starts an enabled session with the default configuration.
    pub async fn start(shell: SimulatedShell) -> Self {
        Self::with_config(shell, &ForesightConfig::default()).await
    }

    /// Starts an enabled session with `config`.
    pub async fn with_config(shell: SimulatedShell, config: &ForesightConfig) -> Self {
        let shell = Arc::new(shell);
        let settings = Arc::new(OverviewSettings::from_config(config).unwrap());
        let handle = OverviewActor::spawn(Extension::new(Arc::clone(&shell), settings));
        shell.attach_sink(handle.event_sink());

        handle.enable().unwrap();
        let session = Self { shell, handle };
        session.settle().await;
        session
    }

    /// Waits until the actor has handled everything emitted so far.
    pub async fn settle(&self) -> ExtensionStatus { self.handle.status().await.unwrap() }

    /// Lets `ms` milliseconds pass, then settles.
    pub async fn advance(&self, ms: u64) -> ExtensionStatus {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        self.settle().await
    }

    /// Returns the controller state, `None` while disabled.
    pub async fn state(&self) -> Option<OverviewState> {
        self.settle().await.controller.map(|c| c.state)
    }

    pub fn commands(&self) -> Vec<OverviewCommand> { self.shell.commands() }

    pub fn shows(&self) -> usize {
        self.commands().iter().filter(|c| matches!(c, OverviewCommand::Show(_))).count()
    }

    pub fn hides(&self) -> usize {
        self.commands().iter().filter(|c| matches!(c, OverviewCommand::Hide)).count()
    }
}
