use axum::{
    extract::{ws::WebSocket, Path, Query, State, WebSocketUpgrade},
    response::Response,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::shared::{AppError, AppState};

use super::{actor::HubHandle, connection::Connection};

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeQuery {
    pub user_id: Option<String>,
}

/// GET /ws/tournaments/:tournament_id?user_id=...
///
/// Upgrades to a WebSocket that receives every event published for the tournament.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(tournament_id): Path<String>,
    Query(query): Query<SubscribeQuery>,
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    if tournament_id.trim().is_empty() {
        return Err(AppError::BadRequest("Tournament ID is required".to_string()));
    }

    let participant_id = query.user_id.filter(|id| !id.is_empty());
    info!(
        tournament_id = %tournament_id,
        participant_id = ?participant_id,
        "WebSocket subscription requested"
    );

    let hub = app_state.hub.clone();
    Ok(ws.on_upgrade(move |socket| {
        handle_websocket_connection(socket, tournament_id, participant_id, hub)
    }))
}

async fn handle_websocket_connection(
    socket: WebSocket,
    tournament_id: String,
    participant_id: Option<String>,
    hub: HubHandle,
) {
    let subscription = match hub.subscribe(&tournament_id, participant_id).await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!(tournament_id = %tournament_id, error = %e, "Subscription failed");
            return;
        }
    };

    let subscription_id = subscription.id;
    let connection = Connection::new(
        subscription.tournament_id,
        subscription.participant_id,
        Box::new(socket),
        subscription.receiver,
    );

    match connection.run().await {
        Ok(()) => {
            info!(
                tournament_id = %tournament_id,
                subscription_id = %subscription_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                tournament_id = %tournament_id,
                subscription_id = %subscription_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    // A no-op if the hub already dropped this subscriber
    if let Err(e) = hub.unsubscribe(subscription_id).await {
        warn!(subscription_id = %subscription_id, error = %e, "Failed to unsubscribe");
    }
}
