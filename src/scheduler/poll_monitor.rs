use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::data::mission_poll::MissionPollRepository;
use crate::error::AppError;
use crate::service::discord_provider::DiscordProvider;
use crate::service::poll::PollService;
use crate::service::tag_catalog::TagCatalogCache;

/// Starts the poll monitor scheduler
///
/// The monitor runs on the hour and half hour and resolves every active
/// poll whose end time has passed. Resolution latency is therefore up to
/// thirty minutes past the nominal end time, which is fine for votes that
/// run half a day or longer.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client shared with the bot
/// - `tag_cache`: Shared forum tag catalog cache
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    tag_cache: Arc<TagCatalogCache>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_db = db.clone();
    let job_http = discord_http.clone();
    let job_tag_cache = tag_cache.clone();

    // Runs at :00 and :30 every hour
    let job = Job::new_async("0 0,30 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();
        let tag_cache = job_tag_cache.clone();

        Box::pin(async move {
            if let Err(e) = process_due_polls(&db, http, &tag_cache).await {
                error!("Error processing due polls: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Poll monitor scheduler started");

    Ok(())
}

/// Resolves every due poll. One poll's failure never blocks the rest; its
/// error is logged and the loop moves on.
pub async fn process_due_polls(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
    tag_cache: &TagCatalogCache,
) -> Result<(), AppError> {
    let due = MissionPollRepository::new(db).get_due(Utc::now()).await?;
    if due.is_empty() {
        return Ok(());
    }
    info!("Resolving {} due poll(s)", due.len());

    let provider = DiscordProvider::new(discord_http, db.clone());
    let service = PollService::new(db, &provider, &provider, &provider, &provider, tag_cache);
    let mut rng = StdRng::from_os_rng();

    for poll in due {
        if let Err(e) = service.resolve_poll(&poll, &mut rng).await {
            error!("Failed to resolve poll #{}: {}", poll.id, e);
        }
    }

    Ok(())
}
