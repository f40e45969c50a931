//! CLI for VoteTopic
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `client`: create a topic, upvote it, and print the ranking (useful for smoke tests)

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use votetopic::config::{Settings, load_config};
use votetopic::store::TopicStore;
use votetopic::transport::websocket::start_websocket_server;
use votetopic::utils::error::ServerError;
use votetopic::utils::logging;

#[derive(Parser)]
#[command(name = "votetopic")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Run a short client session against a running server
    Client {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
        /// Name of the topic to create
        #[arg(long, default_value = "hello")]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            let config = match load_config() {
                Ok(config) => config,
                Err(e) => {
                    logging::init("info");
                    error!("Failed to load configuration: {}", e);
                    return;
                }
            };
            logging::init(&config.logging.level);

            if let Err(e) = run_server(config).await {
                error!("Server failed: {}", e);
            }
        }
        Command::Client { url, name } => {
            logging::init("info");
            if let Err(e) = run_client(&url, &name).await {
                error!("Client failed: {}", e);
            }
        }
    }
}

async fn run_server(config: Settings) -> Result<(), ServerError> {
    let store = Arc::new(TopicStore::new());

    tokio::select! {
        res = start_websocket_server(config, store) => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let (mut ws_stream, _response) = connect_async(url).await?;

    // 1. Create
    let create = json!({ "type": "create_topic", "name": name });
    ws_stream
        .send(WsMessage::Text(create.to_string().into()))
        .await?;

    let Some(Ok(WsMessage::Text(created))) = ws_stream.next().await else {
        return Err("no reply to create_topic".into());
    };
    println!("Created: {created}");

    let v: serde_json::Value = serde_json::from_str(created.as_str())?;
    let Some(id) = v["topic"]["id"].as_str() else {
        return Err(format!("server refused topic: {created}").into());
    };

    // 2. Upvote
    let upvote = json!({ "type": "upvote", "id": id });
    ws_stream
        .send(WsMessage::Text(upvote.to_string().into()))
        .await?;
    if let Some(Ok(WsMessage::Text(voted))) = ws_stream.next().await {
        println!("Upvoted: {voted}");
    }

    // 3. Ranking
    let top = json!({ "type": "top_topics" });
    ws_stream
        .send(WsMessage::Text(top.to_string().into()))
        .await?;
    if let Some(Ok(WsMessage::Text(ranking))) = ws_stream.next().await {
        println!("Top topics: {ranking}");
    }

    ws_stream.close(None).await?;
    Ok(())
}
