//! Subscriber representation
//!
//! A `Subscriber` models one live connection and holds the sending side of a
//! per-connection channel the broadcaster pushes into. Subscribers are
//! ephemeral: nothing about them is persisted, and a reconnecting client is
//! a brand-new subscriber.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::utils::error::DeliveryError;

pub type SubscriberId = String;

/// Connection lifecycle. There is no way out of `Closed`; a reconnect
/// creates a new subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberState {
    Connecting,
    Open,
    Closed,
}

#[derive(Debug)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub sender: UnboundedSender<WsMessage>,
    pub state: SubscriberState,
}

impl Subscriber {
    /// Create a subscriber for a connection whose handshake is still in
    /// flight. The `id` is a UUID used to identify it across broadcaster
    /// operations.
    pub fn connecting(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            state: SubscriberState::Connecting,
        }
    }

    /// Mark the handshake as completed. Only valid from `Connecting`.
    pub fn open(&mut self) {
        if self.state == SubscriberState::Connecting {
            self.state = SubscriberState::Open;
        }
    }

    pub fn close(&mut self) {
        self.state = SubscriberState::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state == SubscriberState::Open
    }

    /// Queue a frame for this subscriber's connection. Fails when the
    /// connection's send loop has gone away.
    pub fn push(&self, msg: WsMessage) -> Result<(), DeliveryError> {
        self.sender.send(msg).map_err(|_| DeliveryError {
            subscriber_id: self.id.clone(),
        })
    }
}
