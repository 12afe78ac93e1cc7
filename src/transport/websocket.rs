//! WebSocket transport
//!
//! A minimal WebSocket server that translates protocol JSON messages into
//! feed and broadcaster operations. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Enforce a login -> auth -> other-message order: clients must present a
//!   valid bearer token before posting, listing, or subscribing
//! - Serialize/deserialize JSON messages and forward them to the feed
//! - Register subscribers with the broadcaster and tear them down on
//!   disconnect or idle timeout
//!
//! Each connection gets an unbounded channel; a dedicated send-loop task
//! drains it into the socket so broadcaster pushes never wait on socket I/O.
//!
//! Security note: the account directory uses plain username/password pairs
//! and in-process JWT signing from a configured secret. For production,
//! front the room with a real identity provider.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::accept_async;
use tracing::{error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::auth::{AccountDirectory, IdentityVerifier, TokenAuthority};
use crate::broadcast::Subscriber;
use crate::config::Settings;
use crate::feed::FeedService;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::FeedError;

pub async fn start_websocket_server(
    addr: String,
    feed: FeedService,
    directory: Arc<AccountDirectory>,
    authority: Arc<TokenAuthority>,
    settings: Settings,
) {
    let listener = TcpListener::bind(addr.clone()).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        spawn(handle_connection(
            stream,
            feed.clone(),
            directory.clone(),
            authority.clone(),
            settings.clone(),
        ));
    }
}

async fn handle_connection(
    stream: TcpStream,
    feed: FeedService,
    directory: Arc<AccountDirectory>,
    authority: Arc<TokenAuthority>,
    settings: Settings,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    // The subscriber is created before the handshake finishes and only
    // becomes eligible for pushes once it is open and registered.
    let mut pending = Some(Subscriber::connecting(tx.clone()));
    let conn_id = pending.as_ref().map(|s| s.id.clone()).unwrap_or_default();

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };
    if let Some(s) = pending.as_mut() {
        s.open();
    }

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Forward queued frames to the socket until either side goes away.
    {
        let conn_id = conn_id.clone();
        spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    warn!("failed to send frame to {conn_id}: {e}");
                    break;
                }
            }
            info!("send loop closed for {conn_id}");
        });
    }

    let broadcaster = feed.broadcaster();
    let idle = settings.server.idle_timeout_secs;
    let mut credential: Option<String> = None;
    let mut live: Option<String> = None;

    loop {
        let frame = if idle == 0 {
            ws_receiver.next().await
        } else {
            match tokio::time::timeout(Duration::from_secs(idle), ws_receiver.next()).await {
                Ok(frame) => frame,
                Err(_) => {
                    info!("{conn_id} idle for {idle}s, closing");
                    break;
                }
            }
        };
        let Some(Ok(msg)) = frame else { break };
        if !msg.is_text() {
            continue;
        }
        let text = msg.to_text().unwrap();

        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::Signup { username, password }) => {
                match directory.signup(&username, &password) {
                    Ok(()) => {
                        info!("account created for {username}");
                        reply(&tx, &ServerMessage::SignupResponse {});
                    }
                    Err(e) => reply_error(&tx, &e),
                }
            }
            Ok(ClientMessage::Login { username, password }) => {
                match directory
                    .login(&username, &password)
                    .and_then(|identity| authority.issue(&identity))
                {
                    Ok(token) => reply(&tx, &ServerMessage::LoginResponse { token }),
                    Err(e) => {
                        warn!("{conn_id} login failed for {username}");
                        reply_error(&tx, &e);
                    }
                }
            }
            Ok(ClientMessage::Auth { token }) => match authority.resolve(&token) {
                Ok(identity) => {
                    info!("{conn_id} authenticated as {}", identity.display_name);
                    credential = Some(token);
                    reply(&tx, &ServerMessage::Authenticated {});
                }
                Err(e) => {
                    warn!("{conn_id} authentication failed");
                    reply_error(&tx, &e);
                    break;
                }
            },
            Ok(_) if credential.is_none() => {
                warn!("{conn_id} sent message before authentication");
                reply_error(&tx, &FeedError::Auth("must authenticate first".into()));
                break;
            }
            Ok(ClientMessage::Append { body }) => {
                match feed.append(credential.as_deref().unwrap_or_default(), &body) {
                    Ok(message) => {
                        info!("{conn_id} appended message {}", message.id);
                        reply(&tx, &ServerMessage::Appended { message });
                    }
                    Err(e) => {
                        if matches!(e, FeedError::Conflict { .. }) {
                            error!("append conflict on {conn_id}: {e}");
                        }
                        reply_error(&tx, &e);
                    }
                }
            }
            Ok(ClientMessage::List) => {
                match feed.list_all(credential.as_deref().unwrap_or_default()) {
                    Ok(messages) => reply(&tx, &ServerMessage::History { messages }),
                    Err(e) => reply_error(&tx, &e),
                }
            }
            Ok(ClientMessage::Subscribe) => {
                if live.is_none() {
                    let sub = match pending.take() {
                        Some(s) => s,
                        None => {
                            // Re-subscribing after an unsubscribe makes a
                            // fresh subscriber; closed ones never come back.
                            let mut s = Subscriber::connecting(tx.clone());
                            s.open();
                            s
                        }
                    };
                    live = Some(sub.id.clone());
                    broadcaster.register(sub);
                    info!("{conn_id} subscribed to the live feed");
                }
            }
            Ok(ClientMessage::Unsubscribe) => {
                if let Some(id) = live.take() {
                    broadcaster.unregister(&id);
                    info!("{conn_id} unsubscribed from the live feed");
                }
            }
            Err(err) => {
                warn!(
                    "invalid client message from {conn_id}: {err} | {}",
                    &text.chars().take(100).collect::<String>()
                );
            }
        }
    }

    if let Some(id) = live.take() {
        broadcaster.unregister(&id);
    }
    info!("{conn_id} disconnected");
}

fn reply(tx: &UnboundedSender<WsMessage>, msg: &ServerMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            let _ = tx.send(WsMessage::text(json));
        }
        Err(e) => warn!("failed to serialize server message: {e}"),
    }
}

fn reply_error(tx: &UnboundedSender<WsMessage>, err: &FeedError) {
    reply(
        tx,
        &ServerMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    );
}
