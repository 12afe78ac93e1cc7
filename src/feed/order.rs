//! Total-order key assignment for accepted messages.
//!
//! A key is the wall-clock accept time at microsecond resolution paired with
//! a fresh UUID. No counter is shared between concurrent writers: the random
//! suffix makes collisions negligible, and when two messages land on the same
//! microsecond their relative order falls back to the lexicographic order of
//! their ids. That tie-break is stable across readers, which is all the room
//! semantics need.

use chrono::Utc;
use uuid::Uuid;

/// Prefix under which every message record is stored. Scanning it yields the
/// full history in accept order.
pub const MESSAGE_KEY_PREFIX: &str = "message:";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderKey {
    /// Microseconds since the UNIX epoch, taken at accept time.
    pub accepted_at: i64,
    /// UUIDv4 string, doubles as the message id.
    pub id: String,
}

impl OrderKey {
    /// Issue a key for a message being accepted right now.
    pub fn next() -> Self {
        Self {
            accepted_at: Utc::now().timestamp_micros(),
            id: Uuid::new_v4().to_string(),
        }
    }

    /// The storage key for this order key. The timestamp is zero-padded to a
    /// fixed width so byte order of keys matches `(accepted_at, id)` order.
    pub fn storage_key(&self) -> String {
        format!("{MESSAGE_KEY_PREFIX}{:020}:{}", self.accepted_at, self.id)
    }
}
