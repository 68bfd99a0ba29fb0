use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
    websocket::{
        room::GroupKey,
        types::{ClientMessage, ErrorPayload, WsMessage},
    },
};

use super::connection::WsSender;

/// Real-time chat WebSocket endpoint.
///
/// The client authenticates through the usual auth middleware (token query
/// parameter on the upgrade request), then joins the rooms for its active
/// conversations and sends/receives chat events as tagged JSON.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

/// Handle one WebSocket connection from upgrade to disconnect.
async fn handle_socket(socket: WebSocket, user_id: Uuid, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    let conn_id = Uuid::new_v4();
    state.room_router.add_connection(conn_id, user_id, tx.clone());

    // Task: forward queued events out to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Task: process inbound client messages
    let state_clone = state.clone();
    let tx_clone = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Text(text) = msg {
                if let Err(e) =
                    process_client_message(&text, conn_id, user_id, &state_clone, &tx_clone).await
                {
                    tracing::debug!("rejected ws message from {}: {}", user_id, e);
                    let _ = tx_clone.send(WsMessage::Error(ErrorPayload {
                        message: e.to_string(),
                    }));
                }
            } else if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Heartbeat task
    let tx_heartbeat = tx.clone();
    let mut heartbeat_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(30));
        loop {
            interval.tick().await;
            if tx_heartbeat.send(WsMessage::Ping).is_err() {
                break;
            }
        }
    });

    // Stop all tasks when any one finishes
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            heartbeat_task.abort();
        },
        _ = &mut recv_task => {
            send_task.abort();
            heartbeat_task.abort();
        },
        _ = &mut heartbeat_task => {
            send_task.abort();
            recv_task.abort();
        }
    }

    // Disconnect drops the connection from every room it joined
    state.room_router.remove_connection(&conn_id);
    tracing::info!("WebSocket closed for user {}", user_id);
}

/// Dispatch one inbound client message.
///
/// A failed operation is reported back on this connection as an `error`
/// event; it never tears down the socket or affects other connections.
async fn process_client_message(
    text: &str,
    conn_id: Uuid,
    user_id: Uuid,
    state: &AppState,
    tx: &WsSender,
) -> Result<()> {
    let client_msg: ClientMessage = serde_json::from_str(text)
        .map_err(|e| AppError::BadRequest(format!("Invalid message format: {}", e)))?;

    match client_msg {
        ClientMessage::JoinTeamRoom { team_id } => {
            state.team_service.verify_membership(team_id, user_id).await?;
            state.room_router.join(GroupKey::team(team_id), conn_id);
        }

        ClientMessage::JoinDirectRoom { user_id: other_id } => {
            state
                .room_router
                .join(GroupKey::direct(user_id, other_id), conn_id);
        }

        ClientMessage::SendTeamMessage { team_id, content } => {
            state
                .message_service
                .send_team_message(user_id, team_id, &content)
                .await?;
        }

        ClientMessage::SendDirectMessage {
            receiver_id,
            content,
        } => {
            state
                .message_service
                .send_direct_message(user_id, receiver_id, &content)
                .await?;
        }

        ClientMessage::Ping => {
            let _ = tx.send(WsMessage::Pong);
        }
    }

    Ok(())
}
