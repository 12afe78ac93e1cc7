//! # Parley
//!
//! `parley` is a minimal single-room realtime discussion service built with
//! Rust. Authenticated users post short text messages to one shared room;
//! every participant sees new messages with low latency and in the same,
//! stable order. Clients talk to the server over WebSockets.
//!
//! ## Core Modules
//!
//! - `feed`: accepts posts, assigns each one its place in the room's total
//!   order, and serves full-history reads.
//! - `persistence`: the durable message log, an embedded `sled` database
//!   keyed so prefix scans come back in accept order.
//! - `broadcast`: best-effort fan-out of newly accepted messages to live
//!   subscriber connections.
//! - `auth`: account signup/login and bearer-token resolution to a stable
//!   user identity.
//! - `transport`: the WebSocket server and the JSON protocol spoken with
//!   clients.
//! - `config`: layered configuration with sensible defaults.
//! - `utils`: the error taxonomy and logging setup.

pub mod auth;
pub mod broadcast;
pub mod config;
pub mod feed;
pub mod persistence;
pub mod transport;
pub mod utils;
