//! Single-writer entity mailbox.
//!
//! Every entity (the game directory, each running game) is owned by one
//! dedicated worker task draining a command channel. Commands addressed to
//! the same entity id therefore execute one at a time in arrival order,
//! while distinct entities run fully in parallel. Callers never hold entity
//! state across an await; they only wait on a reply channel.

use tokio::sync::{mpsc, oneshot};

use crate::error::DomainError;

/// Commands buffered per entity before senders are backpressured.
const MAILBOX_CAPACITY: usize = 64;

/// State owned by an entity worker, mutated one command at a time.
pub trait EntityState: Send + 'static {
    /// The command type this entity accepts.
    type Command: Send + 'static;

    /// Applies one command. Replies travel over channels embedded in the
    /// command itself; a dropped reply sender means the caller went away
    /// and the (still valid) result is discarded.
    fn handle(&mut self, command: Self::Command);
}

/// Cheaply cloneable handle to one entity's mailbox.
#[derive(Debug)]
pub struct EntityRef<C> {
    tx: mpsc::Sender<C>,
}

impl<C> Clone for EntityRef<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C: Send + 'static> EntityRef<C> {
    /// Spawns the worker task owning `state` and returns a handle to its
    /// mailbox. The worker exits once every handle is dropped.
    pub fn spawn<S>(state: S) -> Self
    where
        S: EntityState<Command = C>,
    {
        let (tx, mut rx) = mpsc::channel(MAILBOX_CAPACITY);
        tokio::spawn(async move {
            let mut state = state;
            while let Some(command) = rx.recv().await {
                state.handle(command);
            }
        });
        Self { tx }
    }

    /// Sends a command built around a reply channel and awaits the reply.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone or
    /// drops the reply sender without answering.
    pub async fn ask<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> C,
    ) -> Result<R, DomainError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(command(reply_tx))
            .await
            .map_err(|_| DomainError::EntityUnavailable)?;
        reply_rx.await.map_err(|_| DomainError::EntityUnavailable)
    }

    /// Sends a fire-and-forget command.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn tell(&self, command: C) -> Result<(), DomainError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| DomainError::EntityUnavailable)
    }
}
