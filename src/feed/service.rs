//! Feed service
//!
//! The write and read path of the room. `append` validates an authenticated
//! post, assigns it an order key, persists it, and hands it to the
//! broadcaster; `list_all` serves the full history in accept order.
//!
//! Concurrency notes:
//! - The service is `Clone` and shared across connection tasks without an
//!   outer lock; the store handle is internally synchronized and the
//!   broadcaster guards its own subscriber set. No lock is held across a
//!   store write, so concurrent appends only serialize inside `sled`.
//! - The broadcaster hand-off is best-effort: a dead subscriber never fails
//!   or delays an append.

use std::sync::Arc;

use tracing::error;

use crate::auth::IdentityVerifier;
use crate::broadcast::Broadcaster;
use crate::feed::message::Message;
use crate::feed::order::{MESSAGE_KEY_PREFIX, OrderKey};
use crate::persistence::sled_store::MessageStore;
use crate::utils::error::FeedError;

#[derive(Clone)]
pub struct FeedService {
    store: MessageStore,
    broadcaster: Arc<Broadcaster>,
    verifier: Arc<dyn IdentityVerifier>,
    max_body_chars: usize,
}

impl FeedService {
    pub fn new(
        store: MessageStore,
        broadcaster: Arc<Broadcaster>,
        verifier: Arc<dyn IdentityVerifier>,
        max_body_chars: usize,
    ) -> Self {
        Self {
            store,
            broadcaster,
            verifier,
            max_body_chars,
        }
    }

    /// The broadcaster this service publishes to. The transport registers
    /// live subscribers with it.
    pub fn broadcaster(&self) -> Arc<Broadcaster> {
        self.broadcaster.clone()
    }

    /// Accept a message from the holder of `credential`.
    ///
    /// The credential is resolved on every call; nothing is cached between
    /// requests. On success the message is durably stored before it is
    /// returned, and delivery to live subscribers has been attempted.
    pub fn append(&self, credential: &str, raw_body: &str) -> Result<Message, FeedError> {
        let identity = self.verifier.resolve(credential)?;

        let body = raw_body.trim();
        if body.is_empty() {
            return Err(FeedError::Validation("message cannot be empty".into()));
        }
        if body.chars().count() > self.max_body_chars {
            return Err(FeedError::Validation(format!(
                "message exceeds {} characters",
                self.max_body_chars
            )));
        }

        let key = OrderKey::next();
        let message = Message {
            id: key.id.clone(),
            author: identity.display_name,
            body: body.to_string(),
            accepted_at: key.accepted_at,
        };

        if let Err(e) = self.store.insert(&key.storage_key(), &message) {
            // A conflict here means key assignment is broken; surface it,
            // never drop the message silently.
            error!("append failed for {}: {e}", message.author);
            return Err(e);
        }

        self.broadcaster.publish(&message);
        Ok(message)
    }

    /// Full history, oldest first. Requires a valid credential like `append`.
    pub fn list_all(&self, credential: &str) -> Result<Vec<Message>, FeedError> {
        self.verifier.resolve(credential)?;
        self.store.scan_prefix(MESSAGE_KEY_PREFIX)
    }
}

impl std::fmt::Debug for FeedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedService")
            .field("store", &self.store)
            .field("max_body_chars", &self.max_body_chars)
            .finish()
    }
}
