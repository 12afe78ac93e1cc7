//! CLI for Parley
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `client`: run a simple example client (useful for smoke tests)

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use parley::auth::{AccountDirectory, TokenAuthority};
use parley::broadcast::Broadcaster;
use parley::config::load_config;
use parley::feed::FeedService;
use parley::persistence::MessageStore;
use parley::transport::start_websocket_server;

#[derive(Parser)]
#[command(name = "parley")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Run the example client (connects, signup, login, auth, subscribe, append)
    Client {
        /// WebSocket server URL to connect to (default: ws://127.0.0.1:8080)
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    parley::utils::logging::init("info");

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                error!("Server failed: {e}");
            }
        }
        Command::Client { url } => {
            if let Err(e) = run_client(&url).await {
                error!("Client failed: {e}");
            }
        }
    }
}

async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_config()?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let store = MessageStore::open(&settings.feed.data_dir)?;
    let broadcaster = Arc::new(Broadcaster::new());
    let authority = Arc::new(TokenAuthority::new(
        &settings.auth.jwt_secret,
        settings.auth.token_ttl_secs,
    ));
    let directory = Arc::new(AccountDirectory::new());
    let feed = FeedService::new(
        store,
        broadcaster,
        authority.clone(),
        settings.feed.max_body_chars,
    );

    tokio::select! {
        _ = start_websocket_server(addr, feed, directory, authority, settings.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let (mut ws_stream, _response) = connect_async(url).await?;

    // 1. Signup (ignored if the account already exists)
    let signup = json!({ "type": "signup", "username": "demo", "password": "password" });
    ws_stream
        .send(WsMessage::Text(signup.to_string().into()))
        .await?;
    if let Some(Ok(WsMessage::Text(msg))) = ws_stream.next().await {
        println!("Signup response: {msg}");
    }

    // 2. Login
    let login = json!({ "type": "login", "username": "demo", "password": "password" });
    ws_stream
        .send(WsMessage::Text(login.to_string().into()))
        .await?;

    // 3. Read LoginResponse and extract the token
    if let Some(Ok(WsMessage::Text(msg))) = ws_stream.next().await {
        println!("Login response: {msg}");
        let v: serde_json::Value = serde_json::from_str(&msg)?;
        if let Some(token) = v.get("token").and_then(|t| t.as_str()) {
            // 4. Auth
            let auth = json!({ "type": "auth", "token": token });
            ws_stream
                .send(WsMessage::Text(auth.to_string().into()))
                .await?;
            if let Some(Ok(WsMessage::Text(auth_resp))) = ws_stream.next().await {
                println!("Auth response: {auth_resp}");
            }

            // 5. Subscribe to the live feed
            let subscribe = json!({ "type": "subscribe" });
            ws_stream
                .send(WsMessage::Text(subscribe.to_string().into()))
                .await?;

            // 6. Post a message
            let append = json!({ "type": "append", "body": "Hello from the example client" });
            ws_stream
                .send(WsMessage::Text(append.to_string().into()))
                .await?;

            // Read the append ack and the live push
            for _ in 0..2 {
                if let Some(Ok(WsMessage::Text(incoming))) = ws_stream.next().await {
                    println!("Incoming: {incoming}");
                }
            }
        }
    }

    Ok(())
}
