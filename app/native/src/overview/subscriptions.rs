//! Signal subscription bookkeeping.
//!
//! Every token held here corresponds to a live connection on the shell.
//! Tokens are released before the owning set reconnects, so a workspace
//! switch never leaves a listener behind on the old workspace and never
//! double-subscribes the new one.

use std::collections::BTreeMap;

use crate::shell::{ShellPlatform, Signal, SignalSource, SubscriptionToken, WorkspaceId};

/// Signals held on the current workspace.
const WORKSPACE_SIGNALS: [Signal; 2] = [Signal::WindowAdded, Signal::WindowRemoved];

/// Map from signal to its live connection.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    tokens: BTreeMap<Signal, (SignalSource, SubscriptionToken)>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Connects `signal` on `source`, replacing (and releasing) any previous
    /// connection held for the same signal.
    pub fn connect<P: ShellPlatform + ?Sized>(
        &mut self,
        platform: &P,
        source: SignalSource,
        signal: Signal,
    ) {
        let token = platform.connect(source, signal);
        tracing::trace!(?source, signal = signal.name(), ?token, "foresight: connected");

        if let Some((old_source, old_token)) = self.tokens.insert(signal, (source, token)) {
            tracing::trace!(?old_source, ?old_token, "foresight: replaced existing connection");
            platform.disconnect(old_token);
        }
    }

    /// Releases the connection held for `signal`, if any.
    ///
    /// Returns `true` if a connection was released.
    pub fn release<P: ShellPlatform + ?Sized>(&mut self, platform: &P, signal: Signal) -> bool {
        self.tokens.remove(&signal).is_some_and(|(_, token)| {
            platform.disconnect(token);
            true
        })
    }

    /// Releases every connection. Safe to call on an empty set.
    ///
    /// Returns the number of connections released.
    pub fn release_all<P: ShellPlatform + ?Sized>(&mut self, platform: &P) -> usize {
        let released = self.tokens.len();
        for (signal, (source, token)) in std::mem::take(&mut self.tokens) {
            tracing::trace!(?source, signal = signal.name(), ?token, "foresight: disconnected");
            platform.disconnect(token);
        }
        released
    }

    /// Returns `true` if a connection is held for `signal`.
    #[must_use]
    pub fn contains(&self, signal: Signal) -> bool { self.tokens.contains_key(&signal) }

    /// Returns the number of held connections.
    #[must_use]
    pub fn len(&self) -> usize { self.tokens.len() }

    /// Returns `true` if no connection is held.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }
}

/// The window-added / window-removed subscription of the current workspace.
#[derive(Debug, Default)]
pub struct WorkspaceSubscription {
    workspace: Option<WorkspaceId>,
    signals: SubscriptionSet,
}

impl WorkspaceSubscription {
    /// Creates a subscription tracking no workspace.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Moves the subscription to `workspace`.
    ///
    /// The old workspace's connections are released before the new ones are
    /// made.
    pub fn switch_to<P: ShellPlatform + ?Sized>(&mut self, platform: &P, workspace: WorkspaceId) {
        self.signals.release_all(platform);
        self.workspace = Some(workspace);

        for signal in WORKSPACE_SIGNALS {
            self.signals.connect(platform, SignalSource::Workspace(workspace), signal);
        }
    }

    /// Releases the subscription. Safe to call repeatedly.
    pub fn release<P: ShellPlatform + ?Sized>(&mut self, platform: &P) {
        self.signals.release_all(platform);
        self.workspace = None;
    }

    /// Returns the tracked workspace.
    #[must_use]
    pub const fn workspace(&self) -> Option<WorkspaceId> { self.workspace }

    /// Returns `true` if `workspace` is the tracked one.
    #[must_use]
    pub fn is_current(&self, workspace: WorkspaceId) -> bool { self.workspace == Some(workspace) }

    /// Returns the number of held connections.
    #[must_use]
    pub fn len(&self) -> usize { self.signals.len() }

    /// Returns `true` if no connection is held.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.signals.is_empty() }
}
