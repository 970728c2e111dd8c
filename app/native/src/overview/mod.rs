//! Workspace overview behaviour.
//!
//! - [`classifier`]: which windows count as user work
//! - [`temporary`]: known short-lived launcher and updater windows
//! - [`subscriptions`]: signal connection bookkeeping
//! - [`close_timer`]: close-animation debounce
//! - [`controller`]: the show/hide state machine
//! - [`actor`]: runs the extension on a tokio task

pub mod actor;
pub mod classifier;
pub mod close_timer;
pub mod controller;
pub mod settings;
pub mod subscriptions;
pub mod temporary;

pub use actor::{ActorMessage, OverviewActor, OverviewHandle};
pub use classifier::{is_valid_window, workspace_has_valid_windows};
pub use close_timer::{CloseTimer, PendingClose, close_animation_delay};
pub use controller::{ControllerSnapshot, OverviewController, OverviewState};
pub use settings::OverviewSettings;
pub use subscriptions::{SubscriptionSet, WorkspaceSubscription};
pub use temporary::{TemporaryWindowPattern, TemporaryWindowPatterns, TitlePattern};
