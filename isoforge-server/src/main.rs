//! ISO Forge Server
//!
//! HTTP service that assembles customized bootable Ubuntu images.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Repository: Filesystem image store (build logs and finished artifacts)
//! - Services: Business logic (build launch, progress and download queries)
//! - API: axum handlers plus static serving of artifacts and the frontend
//!
//! There is no database and no in-memory job index. The per-job log file,
//! appended to by the external build tool, is the single source of truth for
//! progress; every query re-derives status from it.

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::ImageStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "isoforge_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ISO Forge server...");

    let config = Config::from_env();
    config.validate()?;

    tracing::info!(
        "Loaded configuration: image_dir={:?}, build_tool={:?}",
        config.image_dir,
        config.build_tool
    );

    let store = ImageStore::new(&config.image_dir);
    store.ensure_dir().await?;

    tracing::info!("Image directory ready at {:?}", store.root());

    let bind_addr = config.bind_addr.clone();
    let app = api::create_router(Arc::new(config), store);

    tracing::info!("Listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
