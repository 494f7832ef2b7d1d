//! Event factory for creating test event slot entities.

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test event slots with customizable fields.
///
/// Defaults to an unassigned "Mission" slot on a date offset by the unique
/// counter so multiple events in one test never collide on the
/// (guild, date, type) uniqueness constraint.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::event::EventFactory;
///
/// let event = EventFactory::new(&db, 100)
///     .event_type("Training")
///     .name("Operation Example")
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    date: NaiveDate,
    event_type: String,
    name: String,
    creator_id: String,
    creator_name: String,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `guild_id` - Discord guild ID the event belongs to
    ///
    /// # Returns
    /// - `EventFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        let offset = next_id();
        let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        Self {
            db,
            guild_id: guild_id.to_string(),
            date: base + chrono::Days::new(offset),
            event_type: "Mission".to_string(),
            name: String::new(),
            creator_id: "0".to_string(),
            creator_name: String::new(),
        }
    }

    /// Sets the calendar date of the slot.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Sets the slot category ("Training" or "Mission").
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Sets the assigned mission name. Non-empty marks the slot assigned.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the creator display name.
    pub fn creator_name(mut self, creator_name: impl Into<String>) -> Self {
        self.creator_name = creator_name.into();
        self
    }

    /// Builds and inserts the event entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::event::Model)` - Created event entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            date: ActiveValue::Set(self.date),
            event_type: ActiveValue::Set(self.event_type),
            name: ActiveValue::Set(self.name),
            creator_id: ActiveValue::Set(self.creator_id),
            creator_name: ActiveValue::Set(self.creator_name),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unassigned event slot with default values.
///
/// Shorthand for `EventFactory::new(db, guild_id).build().await`.
pub async fn create_event(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db, guild_id).build().await
}
