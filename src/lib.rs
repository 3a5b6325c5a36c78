// Library crate for the live match scoring server
// This file exposes the public API for integration tests

pub mod config;
pub mod hub;
pub mod matches;
pub mod scoring;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::{ConfigError, HubConfig, ServerConfig};
pub use hub::{BroadcastMessage, EventType, HubActor, HubError, HubHandle, Subscription};
pub use matches::{
    models::MatchDescriptor,
    repository::{InMemoryMatchRepository, MatchRepository},
    service::ScoringService,
};
pub use shared::{build_router, AppError, AppState};
