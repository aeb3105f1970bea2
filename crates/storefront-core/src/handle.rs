//! Single-writer task that owns a [`Storefront`].
//!
//! The task receives commands from an `mpsc` channel and processes them one
//! at a time, so mutate-then-recompute stays atomic no matter how many
//! handles send commands. After each applied command the task publishes a
//! fresh [`StorefrontSnapshot`] on a `watch` channel for subscribers.

use tokio::sync::{mpsc, oneshot, watch};

use crate::command::{Command, Outcome};
use crate::error::CommerceError;
use crate::storefront::{Storefront, StorefrontSnapshot};

/// Default bound on queued commands per storefront.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Messages sent from [`StorefrontHandle`] to the task.
#[derive(Debug)]
enum Message {
    Apply {
        command: Command,
        reply: oneshot::Sender<Outcome>,
    },
    Snapshot {
        reply: oneshot::Sender<StorefrontSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle to a storefront running on its own task.
#[derive(Debug, Clone)]
pub struct StorefrontHandle {
    sender: mpsc::Sender<Message>,
    updates: watch::Receiver<StorefrontSnapshot>,
}

impl StorefrontHandle {
    /// Move `storefront` onto a new task.
    ///
    /// Must be called from within a tokio runtime. The task stops on
    /// [`StorefrontHandle::shutdown`] or once every handle has been dropped.
    pub fn spawn(storefront: Storefront) -> Self {
        Self::spawn_with_capacity(storefront, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Like [`StorefrontHandle::spawn`] with an explicit queue bound.
    pub fn spawn_with_capacity(storefront: Storefront, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (publisher, updates) = watch::channel(storefront.snapshot());
        tokio::spawn(run_storefront(storefront, receiver, publisher));
        Self { sender, updates }
    }

    /// Send a command and wait for its outcome.
    ///
    /// # Errors
    ///
    /// [`CommerceError::ActorGone`] if the task has stopped.
    pub async fn apply(&self, command: Command) -> Result<Outcome, CommerceError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Message::Apply { command, reply: tx })
            .await
            .map_err(|_| CommerceError::ActorGone)?;
        rx.await.map_err(|_| CommerceError::ActorGone)
    }

    /// Read the current state.
    ///
    /// The snapshot is taken after every command queued before this call.
    pub async fn snapshot(&self) -> Result<StorefrontSnapshot, CommerceError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Message::Snapshot { reply: tx })
            .await
            .map_err(|_| CommerceError::ActorGone)?;
        rx.await.map_err(|_| CommerceError::ActorGone)
    }

    /// Subscribe to state changes.
    ///
    /// The receiver holds the latest snapshot and is notified after every
    /// applied command.
    pub fn subscribe(&self) -> watch::Receiver<StorefrontSnapshot> {
        self.updates.clone()
    }

    /// Stop the task after the commands already queued.
    ///
    /// Calls made through any handle afterwards fail with
    /// [`CommerceError::ActorGone`].
    pub async fn shutdown(&self) -> Result<(), CommerceError> {
        self.sender
            .send(Message::Shutdown)
            .await
            .map_err(|_| CommerceError::ActorGone)
    }

    /// Check whether the task backing this handle is still running.
    pub fn is_alive(&self) -> bool {
        !self.sender.is_closed()
    }
}

async fn run_storefront(
    mut storefront: Storefront,
    mut receiver: mpsc::Receiver<Message>,
    publisher: watch::Sender<StorefrontSnapshot>,
) {
    while let Some(message) = receiver.recv().await {
        match message {
            Message::Apply { command, reply } => {
                let outcome = storefront.apply(command);
                if outcome.is_applied() {
                    publisher.send_replace(storefront.snapshot());
                }
                // The caller may have stopped waiting.
                let _ = reply.send(outcome);
            }
            Message::Snapshot { reply } => {
                let _ = reply.send(storefront.snapshot());
            }
            Message::Shutdown => break,
        }
    }
    tracing::info!("storefront task stopped");
}
