//! Schedule config factory for creating test guild configuration entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild channel configurations.
///
/// Defaults to a fully configured guild with distinct briefing, log and
/// schedule channels derived from the guild id.
pub struct ScheduleConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    briefing_channel_id: Option<String>,
    log_channel_id: Option<String>,
    schedule_channel_id: Option<String>,
    schedule_message_id: Option<String>,
}

impl<'a> ScheduleConfigFactory<'a> {
    /// Creates a new ScheduleConfigFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `guild_id` - Discord guild ID being configured
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            briefing_channel_id: Some((guild_id + 1).to_string()),
            log_channel_id: Some((guild_id + 2).to_string()),
            schedule_channel_id: Some((guild_id + 3).to_string()),
            schedule_message_id: None,
        }
    }

    /// Sets the briefing forum channel id.
    pub fn briefing_channel_id(mut self, id: Option<u64>) -> Self {
        self.briefing_channel_id = id.map(|v| v.to_string());
        self
    }

    /// Sets the log channel id.
    pub fn log_channel_id(mut self, id: Option<u64>) -> Self {
        self.log_channel_id = id.map(|v| v.to_string());
        self
    }

    /// Sets the schedule channel id.
    pub fn schedule_channel_id(mut self, id: Option<u64>) -> Self {
        self.schedule_channel_id = id.map(|v| v.to_string());
        self
    }

    /// Builds and inserts the schedule config entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::schedule_config::Model)` - Created config entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::schedule_config::Model, DbErr> {
        entity::schedule_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            briefing_channel_id: ActiveValue::Set(self.briefing_channel_id),
            log_channel_id: ActiveValue::Set(self.log_channel_id),
            schedule_channel_id: ActiveValue::Set(self.schedule_channel_id),
            schedule_message_id: ActiveValue::Set(self.schedule_message_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fully configured guild with default values.
///
/// Shorthand for `ScheduleConfigFactory::new(db, guild_id).build().await`.
pub async fn create_config(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::schedule_config::Model, DbErr> {
    ScheduleConfigFactory::new(db, guild_id).build().await
}
