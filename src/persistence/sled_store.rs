//! Durable message log backed by `sled`
//!
//! One record per accepted message, keyed by a string that sorts identically
//! to the message's order key, so a prefix scan yields the history in accept
//! order without any post-sort.
//!
//! Writes go through compare-and-swap against an absent value: the store
//! refuses to overwrite an existing key. Keys are unique by construction, so
//! a conflict is an invariant violation upstream, not something to retry.
//! Every write is flushed before `insert` returns; callers may report
//! success only for messages that are actually on disk.

use sled::Db;
use tracing::warn;

use crate::feed::message::Message;
use crate::utils::error::FeedError;

#[derive(Clone)]
pub struct MessageStore {
    db: Db,
}

impl MessageStore {
    /// Open or create a sled database at `path`.
    pub fn open(path: &str) -> Result<Self, FeedError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Persist `message` exclusively under `key`.
    ///
    /// Fails with `Conflict` when the key is already taken. The record is
    /// flushed to disk before this returns.
    pub fn insert(&self, key: &str, message: &Message) -> Result<(), FeedError> {
        let serialized = serde_json::to_vec(message)?;

        self.db
            .compare_and_swap(key.as_bytes(), None::<&[u8]>, Some(serialized))?
            .map_err(|_| FeedError::Conflict {
                key: key.to_string(),
            })?;

        self.db.flush()?;
        Ok(())
    }

    /// All messages stored under `prefix`, in ascending key order. An empty
    /// store yields an empty vector.
    pub fn scan_prefix(&self, prefix: &str) -> Result<Vec<Message>, FeedError> {
        let mut messages = Vec::new();
        for entry in self.db.scan_prefix(prefix.as_bytes()) {
            let (key, value) = entry?;
            match serde_json::from_slice(&value) {
                Ok(message) => messages.push(message),
                Err(e) => {
                    // An undecodable record can only come from a foreign
                    // writer; skip it rather than fail the whole scan.
                    warn!("skipping undecodable record {:?}: {e}", key);
                }
            }
        }
        Ok(messages)
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("db", &"sled::Db")
            .finish()
    }
}
