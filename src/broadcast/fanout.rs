//! Fan-out broadcaster
//!
//! Pushes every newly accepted message to all currently open subscribers,
//! best-effort. Delivery is not persisted and never retried; a subscriber
//! that misses a push recovers by re-reading the history.
//!
//! The live set is owned by the broadcaster instance, not process-global, so
//! independent instances (e.g. in tests) do not interfere. `publish`
//! snapshots the open subscribers and delivers outside the lock, so a
//! subscriber unregistering mid-publish cannot corrupt the loop for others.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::broadcast::subscriber::{Subscriber, SubscriberId};
use crate::feed::message::Message;
use crate::transport::message::ServerMessage;

#[derive(Debug, Default)]
pub struct Broadcaster {
    subscribers: Mutex<HashMap<SubscriberId, Subscriber>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber to the live set. A no-op if a subscriber with the
    /// same id is already registered.
    pub fn register(&self, subscriber: Subscriber) {
        let mut subs = self.subscribers.lock().unwrap();
        subs.entry(subscriber.id.clone()).or_insert(subscriber);
    }

    /// Remove a subscriber from the live set. A no-op if it is not there.
    pub fn unregister(&self, id: &SubscriberId) {
        let mut subs = self.subscribers.lock().unwrap();
        if subs.remove(id).is_some() {
            info!("unregistered subscriber {id}");
        }
    }

    /// Number of subscribers currently in the live set.
    pub fn live_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Deliver `message` to every open subscriber.
    ///
    /// Failures are absorbed here: a subscriber whose connection is gone is
    /// closed and dropped from the set, delivery to the rest proceeds, and
    /// the caller never sees an error.
    pub fn publish(&self, message: &Message) {
        let event = ServerMessage::MessageNew {
            message: message.clone(),
        };
        let text = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize push event: {e}");
                return;
            }
        };
        let ws_msg = WsMessage::text(text);

        // Snapshot open subscribers so delivery happens without the lock.
        let targets: Vec<Subscriber> = {
            let subs = self.subscribers.lock().unwrap();
            subs.values()
                .filter(|s| s.is_open())
                .map(|s| Subscriber {
                    id: s.id.clone(),
                    sender: s.sender.clone(),
                    state: s.state,
                })
                .collect()
        };

        let mut dead = Vec::new();
        for subscriber in targets {
            if let Err(e) = subscriber.push(ws_msg.clone()) {
                warn!("{e}, dropping it");
                dead.push(subscriber.id);
            }
        }

        let mut subs = self.subscribers.lock().unwrap();
        for id in dead {
            if let Some(mut sub) = subs.remove(&id) {
                sub.close();
            }
        }
    }
}
