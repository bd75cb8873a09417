use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use service::{EnrollmentStore, MemoryEnrollmentStore, SeaOrmEnrollmentStore};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the configured enrollment store, migrating the database first
/// when asked to.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn EnrollmentStore>, StartupError> {
    match cfg.store.backend {
        StoreBackend::Memory => {
            warn!(event = "store_memory", "using in-memory store; enrollments are lost on restart");
            Ok(Arc::new(MemoryEnrollmentStore::new()))
        }
        StoreBackend::Database => {
            if cfg.database.url.trim().is_empty() {
                return Err(StartupError::InvalidConfig("database.url is empty".into()));
            }
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(StartupError::Database)?;
            if cfg.database.run_migrations {
                models::db::migrate(&db).await.map_err(StartupError::Database)?;
            }
            Ok(Arc::new(SeaOrmEnrollmentStore::new(db)))
        }
    }
}

/// Build the full application (store, state, router) from configuration.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_public_dir(&cfg.server.public_dir).await?;
    let store = build_store(cfg).await?;
    let state = AppState::new(store, &cfg.soap_endpoint_url());
    Ok(routes::build_router(state, &cfg.soap.path, &cfg.server.public_dir, build_cors()))
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        soap_endpoint = %cfg.soap_endpoint_url(),
        store = ?cfg.store.backend,
        "SOAP API listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_backend_without_url_is_a_config_error() {
        let mut cfg = AppConfig::default();
        cfg.store.backend = StoreBackend::Database;
        cfg.database.url = "  ".into();
        match build_store(&cfg).await {
            Err(StartupError::InvalidConfig(msg)) => assert!(msg.contains("database.url")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("store must not be built without a url"),
        }
    }

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let mut cfg = AppConfig::default();
        cfg.store.backend = StoreBackend::Memory;
        let store = build_store(&cfg).await.expect("memory store");
        assert!(store.list_all().await.expect("list").is_empty());
    }
}
