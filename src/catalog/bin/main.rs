include!("../../lib.rs");
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use crate::utils::trace::setup_tracing;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::catalog::controller::router;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Configuration::from_env()?;
    let addr: SocketAddr = config.bind_address.parse()?;
    let svc: Arc<dyn CatalogService> = Arc::from(factory::create_catalog_service(&config, RepositoryStore::File)?);
    let state = AppState::new(Arc::clone(&svc));

    info!(%addr, data_file = config.data_file.as_str(), "library listening");
    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    svc.flush().await?;
    info!("library stopped");
    Ok(())
}
