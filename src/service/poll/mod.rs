//! Mission poll lifecycle management.
//!
//! A poll moves through exactly one of two paths: `active -> completed` or
//! `active -> failed`. Creation is driven by a user command, resolution by
//! the recurring monitor tick, and cancellation by an admin escape hatch.
//! The service is organized into separate modules by lifecycle stage:
//! - `create` - validation, candidate selection, and poll rendering
//! - `resolve` - tally reading, winner selection, and event application
//! - `cancel` - eager teardown of an active poll

pub mod cancel;
pub mod create;
pub mod resolve;

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use crate::data::schedule_config::ScheduleConfigRepository;
use crate::service::provider::{
    ContentSource, Notifier, ProviderError, ScheduleDisplay, VoteSurface,
};
use crate::service::tag_catalog::TagCatalogCache;

/// Allowed poll durations in hours.
pub const POLL_DURATIONS_HOURS: &[u32] = &[12, 24, 36, 48, 60, 72];

/// Minimum number of options a creation request may ask for. The filtering
/// step separately enforces a hard floor of 2 final options.
pub const MIN_REQUESTED_OPTIONS: usize = 3;

/// Errors reported to the user invoking a poll operation.
///
/// Creation-time failures are synchronous and specific; none of them mutate
/// storage. Database errors pass through for the caller to log.
#[derive(Error, Debug)]
pub enum PollError {
    /// Target event does not exist.
    #[error("Event not found")]
    EventNotFound,

    /// Target event already has a mission assigned.
    #[error("Event {date} already has a mission assigned: {name}")]
    EventAlreadyScheduled { date: String, name: String },

    /// Another active poll already targets the event.
    #[error("There is already an active poll for this event; only one poll per event is allowed")]
    DuplicateActivePoll,

    /// No briefing forum channel configured for the guild.
    #[error("No briefing forum channel configured; run /configure first")]
    NoSourceConfigured,

    /// Duration outside the allowed set.
    #[error("Duration must be one of 12, 24, 36, 48, 60 or 72 hours (got {0})")]
    InvalidDuration(u32),

    /// Requested option count outside [3, 10].
    #[error("Option count must be between 3 and 10 (got {0})")]
    InvalidOptionCount(usize),

    /// No candidates matched the filter criteria.
    #[error("No missions matched the filter criteria")]
    NoCandidates,

    /// Only one candidate matched; a poll needs at least two options.
    #[error("Only one mission ({only}) matched the filter; a poll needs at least 2")]
    NotEnoughCandidates { only: String },

    /// The poll message itself could not be rendered; nothing was persisted.
    #[error("Failed to create the poll message: {0}")]
    SurfaceRender(ProviderError),

    /// A poll targeted by an operation does not exist or is not active.
    #[error("Poll not found or no longer active")]
    PollNotFound,

    /// Candidate discovery failed at the provider.
    #[error("Failed to fetch briefing threads: {0}")]
    Provider(#[from] ProviderError),

    /// Database error.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Service driving the mission poll lifecycle.
///
/// Holds the database connection, the external collaborators behind their
/// provider traits, and the shared tag catalog cache. Randomness is injected
/// per call so tests can supply a seeded generator.
pub struct PollService<'a> {
    db: &'a DatabaseConnection,
    vote: &'a dyn VoteSurface,
    source: &'a dyn ContentSource,
    notifier: &'a dyn Notifier,
    display: &'a dyn ScheduleDisplay,
    tag_cache: &'a TagCatalogCache,
}

impl<'a> PollService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        vote: &'a dyn VoteSurface,
        source: &'a dyn ContentSource,
        notifier: &'a dyn Notifier,
        display: &'a dyn ScheduleDisplay,
        tag_cache: &'a TagCatalogCache,
    ) -> Self {
        Self {
            db,
            vote,
            source,
            notifier,
            display,
            tag_cache,
        }
    }

    /// The guild's configured log channel, used as the DM fallback target.
    async fn log_channel_id(&self, guild_id: u64) -> Option<u64> {
        let config = ScheduleConfigRepository::new(self.db)
            .get(guild_id)
            .await
            .ok()
            .flatten()?;
        config.log_channel_id?.parse().ok()
    }

    /// The guild's configured schedule channel, where winners are announced.
    async fn schedule_channel_id(&self, guild_id: u64) -> Option<u64> {
        let config = ScheduleConfigRepository::new(self.db)
            .get(guild_id)
            .await
            .ok()
            .flatten()?;
        config.schedule_channel_id?.parse().ok()
    }

    /// The guild's configured briefing forum channel.
    async fn briefing_channel_id(&self, guild_id: u64) -> Result<Option<u64>, DbErr> {
        let config = ScheduleConfigRepository::new(self.db).get(guild_id).await?;
        Ok(config
            .and_then(|c| c.briefing_channel_id)
            .and_then(|id| id.parse().ok()))
    }
}
