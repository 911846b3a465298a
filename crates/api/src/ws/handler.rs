use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;

/// GET /api/admin/ws
///
/// Live alert channel for the admin console. Clients only listen; anything
/// they send other than pong or close is ignored.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_session(socket, state))
}

async fn run_session(socket: WebSocket, state: AppState) {
    let sessions = state.ws_manager;
    let conn_id = uuid::Uuid::new_v4().to_string();
    let mut outbox = sessions.add(conn_id.clone()).await;
    let open = sessions.connection_count().await;
    tracing::info!(conn_id = %conn_id, open, "Admin session opened");

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            queued = outbox.recv() => {
                let Some(message) = queued else { break };
                let closing = matches!(message, Message::Close(_));
                if sink.send(message).await.is_err() || closing {
                    break;
                }
            }
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Pong(_))) => sessions.record_pong(&conn_id).await,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Admin session read failed");
                    break;
                }
            },
        }
    }

    sessions.remove(&conn_id).await;
    tracing::info!(conn_id = %conn_id, "Admin session closed");
}
