//! Shared document store
//!
//! A [`DocumentStore`] holds one [`GameDocument`] per join code. Writes are
//! batches of field-scoped [`Update`]s applied atomically; readers learn about
//! changes through a [`Subscription`], which always yields the full merged
//! document rather than a diff.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::game::{GameCode, GameDocument, Update};
use std::sync::Arc;
use tokio::sync::watch;

/// Transport for the replicated game document
pub trait DocumentStore {
    /// Insert a new document under `code`
    ///
    /// # Errors
    /// `StoreError::AlreadyExists` if the code is taken.
    fn create(&self, code: &GameCode, document: GameDocument) -> Result<(), StoreError>;

    /// Current document, or `None` if there is none
    ///
    /// # Errors
    /// Transport failures.
    fn get(&self, code: &GameCode) -> Result<Option<GameDocument>, StoreError>;

    /// Apply `updates` as one atomic batch and notify subscribers
    ///
    /// # Errors
    /// `StoreError::NotFound` for an unknown code; any failing update aborts
    /// the whole batch. A [`Guard`](crate::game::Guard) that does not hold
    /// against the stored document fails with `StoreError::GuardFailed`.
    fn update(&self, code: &GameCode, updates: &[Update]) -> Result<(), StoreError>;

    /// Start observing `code`; dropping the subscription unsubscribes
    ///
    /// # Errors
    /// `StoreError::NotFound` for an unknown code.
    fn subscribe(&self, code: &GameCode) -> Result<Subscription, StoreError>;

    /// Delete the document; subscribers observe [`Delivery::Vanished`]
    ///
    /// # Errors
    /// `StoreError::NotFound` for an unknown code.
    fn remove(&self, code: &GameCode) -> Result<(), StoreError>;
}

/// What a subscription has seen since it was last checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Unchanged,
    Changed(Arc<GameDocument>),
    /// The document was removed
    Vanished,
}

#[derive(Debug)]
pub struct Subscription {
    code: GameCode,
    receiver: watch::Receiver<Option<Arc<GameDocument>>>,
}

impl Subscription {
    #[must_use]
    pub const fn new(code: GameCode, receiver: watch::Receiver<Option<Arc<GameDocument>>>) -> Self {
        Self { code, receiver }
    }

    #[must_use]
    pub const fn code(&self) -> &GameCode {
        &self.code
    }

    /// The latest delivered document without marking it seen
    #[must_use]
    pub fn current(&self) -> Option<Arc<GameDocument>> {
        self.receiver.borrow().clone()
    }

    /// Non-blocking check for a newer document
    pub fn poll(&mut self) -> Delivery {
        match self.receiver.has_changed() {
            Ok(false) => Delivery::Unchanged,
            Ok(true) => self.take(),
            Err(_) => Delivery::Vanished,
        }
    }

    /// Wait for the next change
    pub async fn next(&mut self) -> Delivery {
        match self.receiver.changed().await {
            Ok(()) => self.take(),
            Err(_) => Delivery::Vanished,
        }
    }

    fn take(&mut self) -> Delivery {
        match self.receiver.borrow_and_update().clone() {
            Some(document) => Delivery::Changed(document),
            None => Delivery::Vanished,
        }
    }
}
