use std::net::SocketAddr;
use std::sync::Arc;

use vitrine_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = vitrine_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Vitrine API on port {}", config.server.port);

    let products = vitrine_store::load_seed(config.catalog.seed_path.as_deref())
        .expect("Failed to load catalog seed");
    let catalog = vitrine_store::MemoryCatalog::from_products(products)
        .expect("Failed to build catalog");

    let app_state = AppState::new(Arc::new(catalog), config.cors.allowed_origins.clone());
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
