//! Scenario replay.
//!
//! A replay script describes an initial desktop and a list of steps. The
//! steps are applied to a [`SimulatedShell`] whose notifications feed a real
//! [`OverviewActor`], and every overview command the controller issues is
//! recorded on a timeline.
//!
//! ```jsonc
//! {
//!   "workspaces": 2,
//!   "windows": [{ "workspace": 0, "id": 1, "title": "Editor" }],
//!   "steps": [
//!     { "action": "removeWindow", "workspace": 0, "id": 1 },
//!     { "action": "wait", "ms": 200 }
//!   ]
//! }
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::ForesightError;
use crate::extension::{Extension, ExtensionStatus};
use crate::overview::{OverviewActor, OverviewHandle, OverviewSettings};
use crate::shell::{
    OverviewCommand, OverviewView, SimulatedShell, Window, WindowId, WorkspaceId,
};

/// Upper bound on `workspaces`, the host shell's own workspace limit.
const MAX_WORKSPACES: u32 = 36;

const fn default_workspaces() -> u32 { 1 }

const fn default_true() -> bool { true }

/// A window present before the replay starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededWindow {
    /// Workspace holding the window.
    pub workspace: WorkspaceId,
    /// The window itself.
    #[serde(flatten)]
    pub window: Window,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReplayStep {
    /// Open a window.
    AddWindow {
        workspace: WorkspaceId,
        window: Window,
    },
    /// Close a window.
    RemoveWindow {
        workspace: WorkspaceId,
        id: WindowId,
    },
    /// Change the active workspace.
    SwitchWorkspace { workspace: WorkspaceId },
    /// The user opens the overview.
    ShowOverview {
        #[serde(default)]
        view: OverviewView,
    },
    /// The user dismisses the overview.
    HideOverview,
    /// The user toggles the app-grid control.
    SetAppGrid { checked: bool },
    /// Let time pass.
    Wait { ms: u64 },
    /// Enable the extension.
    Enable,
    /// Disable the extension.
    Disable,
}

impl ReplayStep {
    /// Returns the action name used in scripts.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddWindow { .. } => "addWindow",
            Self::RemoveWindow { .. } => "removeWindow",
            Self::SwitchWorkspace { .. } => "switchWorkspace",
            Self::ShowOverview { .. } => "showOverview",
            Self::HideOverview => "hideOverview",
            Self::SetAppGrid { .. } => "setAppGrid",
            Self::Wait { .. } => "wait",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    const fn workspace(&self) -> Option<WorkspaceId> {
        match self {
            Self::AddWindow { workspace, .. }
            | Self::RemoveWindow { workspace, .. }
            | Self::SwitchWorkspace { workspace } => Some(*workspace),
            _ => None,
        }
    }
}

/// A complete replay script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    /// Number of workspaces.
    #[serde(default = "default_workspaces")]
    pub workspaces: u32,
    /// Workspace active at the start.
    #[serde(default)]
    pub active_workspace: WorkspaceId,
    /// Whether the shell animates window destruction.
    #[serde(default = "default_true")]
    pub animations_enabled: bool,
    /// Whether workspaces only span the primary monitor.
    #[serde(default)]
    pub restrict_to_primary_monitor: bool,
    /// Enable the extension before the first step.
    #[serde(default = "default_true")]
    pub start_enabled: bool,
    /// Windows present at the start.
    #[serde(default)]
    pub windows: Vec<SeededWindow>,
    /// Steps to run, in order.
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    /// Parses a JSONC script.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid script.
    pub fn parse(text: &str) -> Result<Self, ForesightError> {
        let mut stripped = String::new();
        json_comments::StripComments::new(text.as_bytes()).read_to_string(&mut stripped)?;

        let script: Self = serde_json::from_str(&stripped)?;
        script.validate()?;
        Ok(script)
    }

    /// Reads and parses a JSONC script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid script.
    pub fn from_path(path: &Path) -> Result<Self, ForesightError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<(), ForesightError> {
        if self.workspaces == 0 {
            return Err("at least one workspace is required".into());
        }
        if self.workspaces > MAX_WORKSPACES {
            return Err(ForesightError::Replay(format!(
                "workspaces: {} exceeds the limit of {MAX_WORKSPACES}",
                self.workspaces
            )));
        }

        let check = |workspace: WorkspaceId, what: &str| {
            if workspace < self.workspaces {
                Ok(())
            } else {
                Err(ForesightError::Replay(format!(
                    "{what}: workspace {workspace} out of range (0..{})",
                    self.workspaces
                )))
            }
        };

        check(self.active_workspace, "activeWorkspace")?;
        for (index, seeded) in self.windows.iter().enumerate() {
            check(seeded.workspace, &format!("windows[{index}]"))?;
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(workspace) = step.workspace() {
                check(workspace, &format!("steps[{index}] ({})", step.name()))?;
            }
        }

        Ok(())
    }

    /// Builds the simulated shell in its initial state.
    #[must_use]
    pub fn build_shell(&self) -> SimulatedShell {
        let shell = SimulatedShell::new(self.workspaces);
        shell.set_animations_enabled(self.animations_enabled);
        shell.set_workspaces_only_on_primary(self.restrict_to_primary_monitor);
        shell.switch_workspace(self.active_workspace);

        for seeded in &self.windows {
            shell.seed_window(seeded.workspace, seeded.window.clone());
        }
        shell
    }
}

/// Overview commands issued while one step ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Milliseconds since the replay started, taken when the step finished.
    pub at_ms: u64,
    /// Step index, `None` for the initial enable.
    pub step: Option<usize>,
    /// Action name.
    pub action: &'static str,
    /// Commands issued during the step.
    pub commands: Vec<OverviewCommand>,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Per-step commands.
    pub timeline: Vec<TimelineEntry>,
    /// Every command, in order.
    pub commands: Vec<OverviewCommand>,
    /// Extension status after the last step.
    pub status: ExtensionStatus,
}

impl ReplayReport {
    /// Returns the number of `show_overview` calls.
    #[must_use]
    pub fn show_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, OverviewCommand::Show(_))).count()
    }

    /// Returns the number of `hide_overview` calls.
    #[must_use]
    pub fn hide_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, OverviewCommand::Hide)).count()
    }
}

/// Drives a script through the actor and records the timeline.
struct Recorder {
    shell: Arc<SimulatedShell>,
    handle: OverviewHandle,
    start: Instant,
    seen: usize,
    timeline: Vec<TimelineEntry>,
}

impl Recorder {
    /// Waits until the actor has handled everything sent so far, then
    /// records the commands issued since the previous checkpoint.
    async fn checkpoint(&mut self, step: Option<usize>, action: &'static str) -> Result<(), ForesightError> {
        self.handle.status().await?;

        let commands = self.shell.commands();
        let issued = commands.get(self.seen..).map(<[_]>::to_vec).unwrap_or_default();
        self.seen = commands.len();

        let at_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        if !issued.is_empty() {
            tracing::debug!(at_ms, action, count = issued.len(), "foresight: replay step issued commands");
        }
        self.timeline.push(TimelineEntry { at_ms, step, action, commands: issued });
        Ok(())
    }

    fn apply(&self, step: &ReplayStep) -> Result<(), ForesightError> {
        match step {
            ReplayStep::AddWindow { workspace, window } => {
                self.shell.add_window(*workspace, window.clone());
            }
            ReplayStep::RemoveWindow { workspace, id } => {
                if self.shell.remove_window(*workspace, *id).is_none() {
                    tracing::warn!(workspace, window = id, "foresight: replay removed unknown window");
                }
            }
            ReplayStep::SwitchWorkspace { workspace } => self.shell.switch_workspace(*workspace),
            ReplayStep::ShowOverview { view } => self.shell.open_overview(*view),
            ReplayStep::HideOverview => self.shell.close_overview(),
            ReplayStep::SetAppGrid { checked } => self.shell.set_app_grid_checked(*checked),
            ReplayStep::Enable => self.handle.enable()?,
            ReplayStep::Disable => self.handle.disable()?,
            // Handled by the caller
            ReplayStep::Wait { .. } => {}
        }
        Ok(())
    }
}

/// Runs `script` against a fresh simulated shell.
///
/// Must be called from within a tokio runtime with the time driver enabled.
///
/// # Errors
///
/// Returns [`ForesightError::ActorStopped`] if the actor dies mid-replay.
pub async fn run(script: &ReplayScript, settings: Arc<OverviewSettings>) -> Result<ReplayReport, ForesightError> {
    let shell = Arc::new(script.build_shell());
    let handle = OverviewActor::spawn(Extension::new(Arc::clone(&shell), settings));
    shell.attach_sink(handle.event_sink());

    let mut recorder = Recorder {
        shell: Arc::clone(&shell),
        handle: handle.clone(),
        start: Instant::now(),
        seen: 0,
        timeline: Vec::new(),
    };

    if script.start_enabled {
        handle.enable()?;
        recorder.checkpoint(None, "enable").await?;
    }

    for (index, step) in script.steps.iter().enumerate() {
        tracing::trace!(step = index, action = step.name(), "foresight: replay step");
        if let ReplayStep::Wait { ms } = step {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        } else {
            recorder.apply(step)?;
        }
        recorder.checkpoint(Some(index), step.name()).await?;
    }

    let status = handle.status().await?;
    handle.shutdown()?;
    shell.detach_sink();

    Ok(ReplayReport { timeline: recorder.timeline, commands: shell.commands(), status })
}
