#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use fairway::{
    build_router, AppState, HubActor, HubConfig, HubHandle, InMemoryMatchRepository,
    Subscription,
};

pub const TOURNAMENT_ID: &str = "spring-open";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub hub: HubHandle,
    pub repository: Arc<InMemoryMatchRepository>,
}

pub struct TestSetupBuilder {
    hub_config: HubConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            hub_config: HubConfig::default(),
        }
    }

    pub fn with_subscriber_queue_capacity(mut self, capacity: usize) -> Self {
        self.hub_config.subscriber_queue_capacity = capacity;
        self
    }

    /// Must be called inside a tokio runtime, the hub is spawned here
    pub fn build(self) -> TestSetup {
        let hub = HubActor::spawn(self.hub_config);
        let repository = Arc::new(InMemoryMatchRepository::new());
        let app_state = AppState::new(repository.clone(), hub.clone());

        TestSetup {
            app: build_router(app_state),
            hub,
            repository,
        }
    }
}

impl TestSetup {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Creates a match between "eagles" and "hawks" in the test tournament
    pub async fn create_match(
        &self,
        format: &str,
        total_holes: u32,
        eagles: &[&str],
        hawks: &[&str],
    ) -> String {
        self.create_match_in(TOURNAMENT_ID, format, total_holes, eagles, hawks)
            .await
    }

    pub async fn create_match_in(
        &self,
        tournament_id: &str,
        format: &str,
        total_holes: u32,
        eagles: &[&str],
        hawks: &[&str],
    ) -> String {
        let roster: Vec<Value> = eagles
            .iter()
            .map(|p| json!({ "player_id": p, "team_id": "eagles" }))
            .chain(
                hawks
                    .iter()
                    .map(|p| json!({ "player_id": p, "team_id": "hawks" })),
            )
            .collect();

        let (status, body) = self
            .request(
                "POST",
                "/matches",
                Some(json!({
                    "tournament_id": tournament_id,
                    "format": format,
                    "total_holes": total_holes,
                    "team1_id": "eagles",
                    "team2_id": "hawks",
                    "roster": roster,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "match creation failed: {}", body);

        body["id"].as_str().unwrap().to_string()
    }

    pub async fn submit(
        &self,
        match_id: &str,
        hole_number: u32,
        scores: &[(&str, u32)],
    ) -> (StatusCode, Value) {
        let scores: Vec<Value> = scores
            .iter()
            .map(|(player, strokes)| json!({ "user_id": player, "strokes": strokes }))
            .collect();

        self.request(
            "POST",
            &format!("/matches/{}/scores", match_id),
            Some(json!({ "hole_number": hole_number, "scores": scores })),
        )
        .await
    }

    /// PATCHes individual players' strokes on one hole
    pub async fn correct(
        &self,
        match_id: &str,
        hole_number: u32,
        scores: &[(&str, u32)],
    ) -> (StatusCode, Value) {
        let scores: Vec<Value> = scores
            .iter()
            .map(|(player, strokes)| json!({ "user_id": player, "strokes": strokes }))
            .collect();

        self.request(
            "PATCH",
            &format!("/matches/{}/scores/{}", match_id, hole_number),
            Some(json!({ "scores": scores })),
        )
        .await
    }

    /// Submits a hole and fails the test unless it was accepted
    pub async fn submit_ok(&self, match_id: &str, hole_number: u32, scores: &[(&str, u32)]) -> Value {
        let (status, body) = self.submit(match_id, hole_number, scores).await;
        assert_eq!(status, StatusCode::OK, "submission rejected: {}", body);
        body
    }

    pub async fn subscribe(&self, tournament_id: &str) -> Subscription {
        self.hub.subscribe(tournament_id, None).await.unwrap()
    }
}
