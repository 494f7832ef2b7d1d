//! Provider traits for external Discord collaborators.
//!
//! The poll lifecycle never talks to serenity directly; it goes through
//! these traits so tests can substitute deterministic stubs and so every
//! Discord-side failure mode (missing message, deleted thread, undeliverable
//! DM) has an explicit representation. The production implementation is
//! `service::discord_provider::DiscordProvider`.

use serenity::async_trait;
use thiserror::Error;

use crate::model::candidate::ForumThread;

/// Failure talking to an external provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Discord API error from Serenity (boxed, the error type is large).
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// Provider-specific failure with a description.
    #[error("{0}")]
    Other(String),
}

impl From<serenity::Error> for ProviderError {
    fn from(err: serenity::Error) -> Self {
        ProviderError::Discord(Box::new(err))
    }
}

/// The externally-rendered, externally-tallied vote object.
///
/// The core treats the poll message as opaque: it renders it once, reads
/// tallies by answer index, and deletes it during cleanup.
#[async_trait]
pub trait VoteSurface: Send + Sync {
    /// Renders a poll with the given answers, in order. Answer index `i`
    /// corresponds to `options[i]` for the lifetime of the poll.
    ///
    /// Returns the message id of the rendered poll.
    async fn render(
        &self,
        channel_id: u64,
        question: &str,
        options: &[String],
        duration_hours: u32,
    ) -> Result<u64, ProviderError>;

    /// Reads vote counts per answer index from the live poll message.
    ///
    /// Returns `Ok(None)` when the message (or its poll) no longer exists.
    async fn read_tallies(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<Vec<u64>>, ProviderError>;

    /// Posts the companion briefing-links embed. Returns its message id.
    async fn post_listing(
        &self,
        channel_id: u64,
        title: &str,
        lines: &[String],
    ) -> Result<u64, ProviderError>;

    /// Deletes a message. An already-deleted message is not an error.
    async fn delete(&self, channel_id: u64, message_id: u64) -> Result<(), ProviderError>;
}

/// The briefing forum the candidates are drawn from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Lists all threads in the forum channel, active and archived, deduplicated
    /// by id. Partial archive-fetch failures are logged and skipped.
    async fn list_threads(&self, channel_id: u64) -> Result<Vec<ForumThread>, ProviderError>;

    /// Fetches a single thread by id. `Ok(None)` when it no longer exists.
    async fn get_thread(&self, thread_id: u64) -> Result<Option<ForumThread>, ProviderError>;

    /// Lists the tag names available on the forum channel.
    async fn available_tags(&self, channel_id: u64) -> Result<Vec<String>, ProviderError>;
}

/// Best-effort user notification.
///
/// Delivery failures are a normal outcome (closed DMs, missing users), so
/// these methods report delivered-or-not instead of erroring.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// DMs a user, falling back to the given channel when the DM fails.
    /// Returns whether anything was delivered.
    async fn dm_or_fallback(
        &self,
        user_id: u64,
        content: &str,
        fallback_channel_id: Option<u64>,
    ) -> bool;

    /// Posts a visible announcement to a channel. Returns whether it was sent.
    async fn announce(&self, channel_id: u64, content: &str) -> bool;
}

/// Downstream schedule-display refresh hook, invoked after a poll applies its
/// winner to an event slot.
#[async_trait]
pub trait ScheduleDisplay: Send + Sync {
    /// Refreshes the guild's schedule display. Returns whether it succeeded.
    async fn refresh(&self, guild_id: u64) -> bool;
}
