mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;

use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::error::AppError;
use crate::scheduler::poll_monitor;
use crate::service::tag_catalog::TagCatalogCache;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;
    let tag_cache = Arc::new(TagCatalogCache::new());

    info!("Starting mission board");

    let (bot_client, discord_http) =
        bot::start::init_bot(&config, db.clone(), tag_cache.clone()).await?;

    // Discord bot runs in its own task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            error!("Discord bot error: {}", e);
        }
    });

    poll_monitor::start_scheduler(db, discord_http, tag_cache).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::InternalError(format!("failed to listen for shutdown: {}", e)))?;
    info!("Shutting down");

    Ok(())
}
