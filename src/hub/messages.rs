use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display};
use tokio::sync::{mpsc, oneshot};

use crate::scoring::{HoleResult, MatchStatus};

/// Event types pushed to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    Connected,
    ScoreUpdated,
    MatchCompleted,
}

/// Wire envelope. Payload fields are flattened next to `type`, so a score
/// update arrives as `{"type": "score_updated", "tournament_id": .., "match_id": .., ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

const ENVELOPE_KEYS: [&str; 3] = ["type", "tournament_id", "timestamp"];

impl BroadcastMessage {
    /// Object payloads are flattened into the envelope; anything else is
    /// carried under a `data` key.
    pub fn new(event_type: EventType, tournament_id: Option<String>, payload: Value) -> Self {
        let mut payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        for key in ENVELOPE_KEYS {
            payload.remove(key);
        }

        Self {
            event_type,
            tournament_id,
            timestamp: Utc::now(),
            payload,
        }
    }

    pub fn connected(tournament_id: &str) -> Self {
        Self::new(
            EventType::Connected,
            Some(tournament_id.to_string()),
            serde_json::json!({ "message": "Connected to tournament" }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdatedPayload {
    pub match_id: String,
    pub hole_number: u32,
    pub hole_result: HoleResult,
    pub match_status: MatchStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub team1_points: f64,
    pub team2_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCompletedPayload {
    pub match_id: String,
    pub winner_team_id: Option<String>,
    pub final_score: FinalScore,
}

/// Assigned by the hub when a subscription is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Commands accepted by the hub's coordinator task
#[derive(Debug)]
pub enum HubCommand {
    Subscribe {
        tournament_id: String,
        participant_id: Option<String>,
        outbound: mpsc::Sender<String>,
        /// `None` when the acknowledgement could not be delivered
        response: oneshot::Sender<Option<SubscriptionId>>,
    },

    Unsubscribe {
        subscription_id: SubscriptionId,
    },

    PublishToTournament {
        tournament_id: String,
        message: BroadcastMessage,
    },

    PublishToAll {
        message: BroadcastMessage,
    },

    SubscriberCount {
        tournament_id: String,
        response: oneshot::Sender<usize>,
    },

    TournamentCount {
        response: oneshot::Sender<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_payload_is_flattened_into_the_envelope() {
        let message = BroadcastMessage::new(
            EventType::ScoreUpdated,
            Some("open-2024".into()),
            json!({ "match_id": "m1", "hole_number": 3 }),
        );

        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["type"], "score_updated");
        assert_eq!(wire["tournament_id"], "open-2024");
        assert_eq!(wire["match_id"], "m1");
        assert_eq!(wire["hole_number"], 3);
        assert!(wire["timestamp"].is_string());
    }

    #[test]
    fn payload_cannot_override_envelope_fields() {
        let message = BroadcastMessage::new(
            EventType::MatchCompleted,
            None,
            json!({ "type": "spoofed", "winner_team_id": "t1" }),
        );

        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["type"], "match_completed");
        assert!(wire.get("tournament_id").is_none());
        assert_eq!(wire["winner_team_id"], "t1");
    }

    #[test]
    fn scalar_payload_is_wrapped_in_data() {
        let message = BroadcastMessage::new(EventType::ScoreUpdated, None, json!([1, 2]));

        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["data"], json!([1, 2]));
    }

    #[test]
    fn connected_acknowledgement_names_the_tournament() {
        let wire = serde_json::to_value(BroadcastMessage::connected("spring-cup")).unwrap();

        assert_eq!(wire["type"], "connected");
        assert_eq!(wire["tournament_id"], "spring-cup");
    }
}
