//! Overview actor.
//!
//! Runs an [`Extension`] on a single tokio task. Shell notifications,
//! lifecycle requests and close-timer expiry are all serialized through
//! one loop, so handlers never interleave and a cancelled timer can never
//! fire after the event that cancelled it.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::ForesightError;
use crate::extension::{Extension, ExtensionStatus};
use crate::overview::PendingClose;
use crate::shell::{EventSink, ShellEvent, ShellPlatform};

/// Messages accepted by the overview actor.
#[derive(Debug)]
pub enum ActorMessage {
    /// A shell notification.
    Shell(ShellEvent),
    /// Enable the extension.
    Enable,
    /// Disable the extension.
    Disable,
    /// Report the extension status.
    Status {
        /// Response channel.
        respond_to: oneshot::Sender<ExtensionStatus>,
    },
    /// Disable and stop the actor.
    Shutdown,
}

impl ActorMessage {
    /// Returns the message name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shell(event) => event.name(),
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Status { .. } => "status",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Whatever woke the loop up.
enum Wakeup {
    Message(Option<ActorMessage>),
    CloseDue(PendingClose),
}

/// Task that owns the extension.
pub struct OverviewActor<P: ShellPlatform + Clone> {
    extension: Extension<P>,
    receiver: mpsc::UnboundedReceiver<ActorMessage>,
}

impl<P> OverviewActor<P>
where
    P: ShellPlatform + Clone + Send + 'static,
{
    /// Spawns the actor on the current tokio runtime.
    ///
    /// The extension starts in whatever state it is handed over in.
    #[must_use]
    pub fn spawn(extension: Extension<P>) -> OverviewHandle {
        tracing::debug!("foresight: spawning overview actor");
        let (sender, receiver) = mpsc::unbounded_channel();

        let actor = Self { extension, receiver };
        tokio::spawn(actor.run());

        OverviewHandle::new(sender)
    }

    async fn run(mut self) {
        tracing::trace!("foresight: actor loop starting");

        loop {
            let wakeup = tokio::select! {
                biased;
                msg = self.receiver.recv() => Wakeup::Message(msg),
                pending = self.extension.close_timer_elapsed() => Wakeup::CloseDue(pending),
            };

            match wakeup {
                Wakeup::Message(None) => {
                    tracing::debug!("foresight: actor channel closed, exiting");
                    break;
                }
                Wakeup::Message(Some(ActorMessage::Shutdown)) => {
                    tracing::debug!("foresight: actor received shutdown");
                    break;
                }
                Wakeup::Message(Some(msg)) => self.handle_message(msg),
                Wakeup::CloseDue(pending) => {
                    tracing::trace!(workspace = pending.workspace, "foresight: close animation over");
                    self.extension.on_close_timer_elapsed(pending);
                }
            }
        }

        self.extension.disable();
    }

    fn handle_message(&mut self, msg: ActorMessage) {
        tracing::trace!(message = msg.name(), "foresight: actor message");

        match msg {
            ActorMessage::Shell(event) => self.extension.handle_event(event),
            ActorMessage::Enable => {
                self.extension.enable();
            }
            ActorMessage::Disable => {
                self.extension.disable();
            }
            ActorMessage::Status { respond_to } => {
                if respond_to.send(self.extension.status()).is_err() {
                    tracing::trace!("foresight: status requester went away");
                }
            }
            // Handled in run()
            ActorMessage::Shutdown => {}
        }
    }
}

/// Cloneable handle to a running [`OverviewActor`].
#[derive(Clone, Debug)]
pub struct OverviewHandle {
    sender: mpsc::UnboundedSender<ActorMessage>,
}

impl OverviewHandle {
    const fn new(sender: mpsc::UnboundedSender<ActorMessage>) -> Self { Self { sender } }

    /// Sends a message without waiting for it to be handled.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has exited.
    pub fn send(&self, msg: ActorMessage) -> Result<(), ForesightError> {
        self.sender.send(msg).map_err(|_| ForesightError::ActorStopped)
    }

    /// Forwards a shell notification.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has exited.
    pub fn notify(&self, event: ShellEvent) -> Result<(), ForesightError> {
        self.send(ActorMessage::Shell(event))
    }

    /// Enables the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has exited.
    pub fn enable(&self) -> Result<(), ForesightError> { self.send(ActorMessage::Enable) }

    /// Disables the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has exited.
    pub fn disable(&self) -> Result<(), ForesightError> { self.send(ActorMessage::Disable) }

    /// Asks the actor for the extension status.
    ///
    /// Every message sent before this one has been handled once it resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has exited.
    pub async fn status(&self) -> Result<ExtensionStatus, ForesightError> {
        let (tx, rx) = oneshot::channel();
        self.send(ActorMessage::Status { respond_to: tx })?;
        rx.await.map_err(|_| ForesightError::ActorStopped)
    }

    /// Disables the extension and stops the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ForesightError::ActorStopped`] if the actor has already exited.
    pub fn shutdown(&self) -> Result<(), ForesightError> { self.send(ActorMessage::Shutdown) }

    /// Returns `true` while the actor is running.
    #[must_use]
    pub fn is_alive(&self) -> bool { !self.sender.is_closed() }

    /// Returns a sink that forwards shell notifications to the actor.
    ///
    /// Notifications emitted after the actor stopped are dropped.
    #[must_use]
    pub fn event_sink(&self) -> EventSink {
        let handle = self.clone();
        Arc::new(move |event| {
            if handle.notify(event).is_err() {
                tracing::trace!("foresight: actor stopped, dropping shell event");
            }
        })
    }
}
