use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::session_manager::SessionManager;
use hangman_types::{ClientMessage, GameError};

pub mod handlers;


use handlers::MessageHandler;

pub async fn handle_connection(websocket: WebSocket, session_manager: Arc<SessionManager>) {
    let (session, message_receiver) = session_manager.create_session().await;
    let session_id = session.id();
    info!("New WebSocket connection: session {}", session_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let message_handler = MessageHandler::new(session.clone());

    // Handle incoming messages
    let incoming_handler = {
        let message_handler = message_handler.clone();

        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if msg.is_close() {
                            break;
                        }
                        handle_message(msg, &message_handler).await;
                    }
                    Err(e) => {
                        warn!("WebSocket error for session {}: {}", session_id, e);
                        break;
                    }
                }
            }
        }
    };

    // Handle outgoing messages
    let outgoing_handler = {
        async move {
            let mut receiver = message_receiver;

            while let Some(message) = receiver.recv().await {
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize message: {:?}", e);
                        continue;
                    }
                };

                if let Err(e) = ws_sender.send(Message::text(json)).await {
                    warn!("Failed to send message to session {}: {:?}", session_id, e);
                    break;
                }
            }
        }
    };

    // Run both handlers concurrently
    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
        _ = session.closed() => {
            info!("Session {} was closed by the server, hanging up", session_id);
        },
    }

    info!("Session {} disconnected", session_id);
    session_manager.remove_session(session_id).await;
}

/// Bad input is answered with an error message; the connection stays open
async fn handle_message(msg: Message, message_handler: &MessageHandler) {
    // Only handle text messages
    if !msg.is_text() {
        return;
    }

    let Ok(text) = msg.to_str() else {
        return;
    };

    match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_message) => message_handler.handle_message(client_message).await,
        Err(e) => {
            warn!(
                "Invalid message from session {}: {}",
                message_handler.session_id(),
                e
            );
            message_handler.send_error(GameError::InvalidMessage {
                reason: e.to_string(),
            });
        }
    }
}
