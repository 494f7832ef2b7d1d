//! Application error types.
//!
//! `AppError` is the top-level error aggregating infrastructure failures
//! (database, Discord API, scheduler, configuration). Service-level errors
//! that are reported back to the invoking user live next to their service
//! (see `service::poll::PollError`).

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion so infrastructure
/// errors can bubble with `?` through startup, the bot handlers, and the
/// scheduler tick.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed because `serenity::Error` is large and would inflate every
    /// `AppError` variant otherwise.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with a custom message.
    #[error("{0}")]
    InternalError(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
