//! Mission poll factory for creating test poll entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test mission polls with customizable fields.
///
/// Defaults to an active poll with three candidate threads ending a day from
/// now. Message and creator ids are derived from the unique counter.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::mission_poll::MissionPollFactory;
///
/// let poll = MissionPollFactory::new(&db, 100, event.id)
///     .status("completed")
///     .winning_thread_id(Some(42))
///     .build()
///     .await?;
/// ```
pub struct MissionPollFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    poll_message_id: String,
    channel_id: String,
    target_event_id: i32,
    framework_filter: String,
    composition_filter: String,
    mission_thread_ids: Vec<u64>,
    poll_end_time: DateTime<Utc>,
    status: String,
    winning_thread_id: Option<String>,
    created_by: String,
    links_message_id: Option<String>,
}

impl<'a> MissionPollFactory<'a> {
    /// Creates a new MissionPollFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `guild_id` - Discord guild ID the poll belongs to
    /// - `target_event_id` - ID of the event the poll resolves into
    ///
    /// # Returns
    /// - `MissionPollFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, target_event_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            poll_message_id: (900_000 + id).to_string(),
            channel_id: (800_000 + id).to_string(),
            target_event_id,
            framework_filter: "Framework 5.0".to_string(),
            composition_filter: "All".to_string(),
            mission_thread_ids: vec![1_001, 1_002, 1_003],
            poll_end_time: Utc::now() + Duration::hours(24),
            status: "active".to_string(),
            winning_thread_id: None,
            created_by: (700_000 + id).to_string(),
            links_message_id: None,
        }
    }

    /// Sets the lifecycle status ("active", "completed" or "failed").
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the candidate thread ids, in answer order.
    pub fn mission_thread_ids(mut self, ids: Vec<u64>) -> Self {
        self.mission_thread_ids = ids;
        self
    }

    /// Sets the scheduled end of the vote.
    pub fn poll_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.poll_end_time = end;
        self
    }

    /// Sets the winning thread id.
    pub fn winning_thread_id(mut self, id: Option<u64>) -> Self {
        self.winning_thread_id = id.map(|v| v.to_string());
        self
    }

    /// Sets the framework filter tag.
    pub fn framework_filter(mut self, framework: impl Into<String>) -> Self {
        self.framework_filter = framework.into();
        self
    }

    /// Sets the creator user id.
    pub fn created_by(mut self, user_id: u64) -> Self {
        self.created_by = user_id.to_string();
        self
    }

    /// Sets the links companion message id.
    pub fn links_message_id(mut self, id: Option<u64>) -> Self {
        self.links_message_id = id.map(|v| v.to_string());
        self
    }

    /// Builds and inserts the mission poll entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::mission_poll::Model)` - Created poll entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::mission_poll::Model, DbErr> {
        let thread_ids_json = serde_json::to_string(&self.mission_thread_ids)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        entity::mission_poll::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            poll_message_id: ActiveValue::Set(self.poll_message_id),
            channel_id: ActiveValue::Set(self.channel_id),
            target_event_id: ActiveValue::Set(self.target_event_id),
            framework_filter: ActiveValue::Set(self.framework_filter),
            composition_filter: ActiveValue::Set(self.composition_filter),
            mission_thread_ids: ActiveValue::Set(thread_ids_json),
            poll_end_time: ActiveValue::Set(self.poll_end_time),
            status: ActiveValue::Set(self.status),
            winning_thread_id: ActiveValue::Set(self.winning_thread_id),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            links_message_id: ActiveValue::Set(self.links_message_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active mission poll with default values.
///
/// Shorthand for `MissionPollFactory::new(db, guild_id, target_event_id).build().await`.
pub async fn create_poll(
    db: &DatabaseConnection,
    guild_id: u64,
    target_event_id: i32,
) -> Result<entity::mission_poll::Model, DbErr> {
    MissionPollFactory::new(db, guild_id, target_event_id)
        .build()
        .await
}
