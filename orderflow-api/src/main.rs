use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use orderflow_api::{app, AppState};
use orderflow_core::OrderStore;
use orderflow_infra::app_config::{Config, StoreBackend};
use orderflow_infra::clients::build_http_client;
use orderflow_infra::{
    DbClient, HttpInventoryClient, HttpPaymentClient, HttpServiceLookup, InMemoryOrderStore,
    PgOrderStore, ServiceRegistry,
};
use orderflow_order::OrderWorkflow;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderflow_api=debug,orderflow_order=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting order service on port {}", config.server.port);

    let store: Arc<dyn OrderStore> = match config.store.backend {
        StoreBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(PgOrderStore::new(db.pool.clone()))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory order store, orders are lost on restart");
            Arc::new(InMemoryOrderStore::new())
        }
    };

    let registry = Arc::new(ServiceRegistry::new(&config.services.endpoints));
    let http = build_http_client(config.services.timeout()).context("Failed to build HTTP client")?;

    let workflow = OrderWorkflow::new(
        store,
        Arc::new(HttpInventoryClient::new(http.clone(), registry.clone(), &config.services.product)),
        Arc::new(HttpPaymentClient::new(http.clone(), registry.clone(), &config.services.payment)),
        Arc::new(HttpServiceLookup::new(http, registry, &config.services.product)),
    );

    let app = app(AppState::new(workflow));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
