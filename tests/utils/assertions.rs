//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc::error::TryRecvError;

use fairway::{EventType, HubHandle, Subscription};

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct EventAssertion<'a> {
    subscription: &'a mut Subscription,
}

impl<'a> EventAssertion<'a> {
    pub fn for_subscription(subscription: &'a mut Subscription) -> Self {
        Self { subscription }
    }

    /// Assert the next queued event has the given type (consumes it)
    pub async fn received_event(self, expected_type: EventType) -> EventContent {
        let raw = tokio::time::timeout(Duration::from_secs(2), self.subscription.receiver.recv())
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for {}", expected_type))
            .unwrap_or_else(|| panic!("subscription closed while waiting for {}", expected_type));

        let body: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            body["type"],
            expected_type.as_ref(),
            "received wrong event type: {}",
            body
        );
        assert!(body["timestamp"].is_string(), "event has no timestamp");

        EventContent { body }
    }

    /// Assert nothing is queued once the hub has processed everything sent so far
    pub async fn received_nothing(self, hub: &HubHandle) {
        // Any request/response round trip is ordered after earlier publishes
        hub.tournament_count().await.unwrap();

        match self.subscription.receiver.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(message) => panic!("expected no events, got {}", message),
            Err(TryRecvError::Disconnected) => panic!("subscription was dropped"),
        }
    }

    /// Assert the hub has dropped this subscription and nothing is left queued
    pub async fn was_dropped(self) {
        let next = tokio::time::timeout(Duration::from_secs(2), self.subscription.receiver.recv())
            .await
            .expect("timed out waiting for the subscription to close");
        assert!(next.is_none(), "expected a closed subscription, got {:?}", next);
    }
}

pub struct EventContent {
    pub body: Value,
}

impl EventContent {
    pub fn verify_tournament(self, tournament_id: &str) -> Self {
        assert_eq!(self.body["tournament_id"], tournament_id);
        self
    }

    pub fn verify_field(self, key: &str, expected: Value) -> Self {
        assert_eq!(self.body[key], expected, "unexpected {} in {}", key, self.body);
        self
    }

    pub fn verify_hole_winner(self, hole_number: u32, winner: Option<&str>) -> Self {
        assert_eq!(self.body["hole_number"], hole_number);
        assert_eq!(
            self.body["hole_result"]["winner_team_id"].as_str(),
            winner,
            "unexpected hole winner in {}",
            self.body
        );
        self
    }

    pub fn verify_standing(self, eagles: f64, hawks: f64, complete: bool) -> Self {
        let status = &self.body["match_status"];
        assert_eq!(status["team1_total_points"].as_f64(), Some(eagles));
        assert_eq!(status["team2_total_points"].as_f64(), Some(hawks));
        assert_eq!(status["match_complete"], complete);
        self
    }
}
