//! The message record.
//!
//! Fields:
//! - `id`: UUIDv4 string assigned at accept time, unique across the room
//! - `author`: display name resolved through the identity verifier; never
//!   taken from client input
//! - `body`: trimmed, non-empty text
//! - `accepted_at`: microseconds since the UNIX epoch, assigned by the
//!   server at accept time
//!
//! A message is immutable once accepted and is never deleted.

use serde::{Deserialize, Serialize};

use crate::feed::order::OrderKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: String,
    pub body: String,
    pub accepted_at: i64,
}

impl Message {
    /// The order key this message was accepted under.
    pub fn order_key(&self) -> OrderKey {
        OrderKey {
            accepted_at: self.accepted_at,
            id: self.id.clone(),
        }
    }

    /// The storage key this message is persisted under.
    pub fn storage_key(&self) -> String {
        self.order_key().storage_key()
    }
}
