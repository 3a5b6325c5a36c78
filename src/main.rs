use std::sync::Arc;

use fairway::{build_router, AppState, HubActor, InMemoryMatchRepository, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine, the process environment still applies
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting live scoring server");

    let config = ServerConfig::from_env()?;

    let hub = HubActor::spawn(config.hub);
    let match_repository = Arc::new(InMemoryMatchRepository::new());
    let app_state = AppState::new(match_repository, hub);

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(bind = %config.bind, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
