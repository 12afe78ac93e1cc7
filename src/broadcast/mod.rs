//! Live fan-out: the broadcaster and its ephemeral subscribers.

pub mod fanout;
pub mod subscriber;

pub use fanout::Broadcaster;
pub use subscriber::{Subscriber, SubscriberId, SubscriberState};
