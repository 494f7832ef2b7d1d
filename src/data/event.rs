use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::event::{AssignEventParams, Event};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event slot unless one already exists for the same
    /// (guild, date, event_type).
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64, stored as string)
    /// - `date`: Calendar date of the slot
    /// - `event_type`: Slot category ("Training" or "Mission")
    ///
    /// # Returns
    /// - `Ok((true, event))`: Slot was created
    /// - `Ok((false, event))`: Slot already existed, returned unchanged
    /// - `Err(DbErr)`: Database error
    pub async fn create_if_absent(
        &self,
        guild_id: u64,
        date: NaiveDate,
        event_type: &str,
    ) -> Result<(bool, Event), DbErr> {
        let guild_id_str = guild_id.to_string();

        let existing = entity::prelude::Event::find()
            .filter(entity::event::Column::GuildId.eq(guild_id_str.as_str()))
            .filter(entity::event::Column::Date.eq(date))
            .filter(entity::event::Column::EventType.eq(event_type))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            return Ok((false, Event::from_entity(existing)));
        }

        let created = entity::event::ActiveModel {
            guild_id: ActiveValue::Set(guild_id_str),
            date: ActiveValue::Set(date),
            event_type: ActiveValue::Set(event_type.to_string()),
            name: ActiveValue::Set(String::new()),
            creator_id: ActiveValue::Set("0".to_string()),
            creator_name: ActiveValue::Set(String::new()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok((true, Event::from_entity(created)))
    }

    /// Gets an event by ID.
    ///
    /// # Returns
    /// - `Ok(Some(event))`: The event
    /// - `Ok(None)`: Event not found
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let event = entity::prelude::Event::find_by_id(id).one(self.db).await?;

        Ok(event.map(Event::from_entity))
    }

    /// Gets unassigned event slots for a guild within a date range, ordered
    /// by date then type.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64)
    /// - `start`: Inclusive start date
    /// - `end`: Inclusive end date
    ///
    /// # Returns
    /// - `Ok(events)`: Unassigned slots in the range
    /// - `Err(DbErr)`: Database error
    pub async fn get_unassigned_in_range(
        &self,
        guild_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, DbErr> {
        let guild_id_str = guild_id.to_string();

        let events = entity::prelude::Event::find()
            .filter(entity::event::Column::GuildId.eq(guild_id_str.as_str()))
            .filter(entity::event::Column::Date.gte(start))
            .filter(entity::event::Column::Date.lte(end))
            .filter(entity::event::Column::Name.eq(""))
            .order_by_asc(entity::event::Column::Date)
            .order_by_asc(entity::event::Column::EventType)
            .all(self.db)
            .await?;

        Ok(events.into_iter().map(Event::from_entity).collect())
    }

    /// Gets all event slots for a guild within a date range, assigned or
    /// not, ordered by date then type. Used to render the schedule display.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64)
    /// - `start`: Inclusive start date
    /// - `end`: Inclusive end date
    ///
    /// # Returns
    /// - `Ok(events)`: Slots in the range
    /// - `Err(DbErr)`: Database error
    pub async fn get_in_range(
        &self,
        guild_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, DbErr> {
        let guild_id_str = guild_id.to_string();

        let events = entity::prelude::Event::find()
            .filter(entity::event::Column::GuildId.eq(guild_id_str.as_str()))
            .filter(entity::event::Column::Date.gte(start))
            .filter(entity::event::Column::Date.lte(end))
            .order_by_asc(entity::event::Column::Date)
            .order_by_asc(entity::event::Column::EventType)
            .all(self.db)
            .await?;

        Ok(events.into_iter().map(Event::from_entity).collect())
    }

    /// Assigns a mission to an event slot. The write is guarded: it only
    /// fills a slot that is still unassigned, so an assignment that landed
    /// in the meantime is never overwritten.
    ///
    /// # Returns
    /// - `Ok(true)`: Assignment written
    /// - `Ok(false)`: Event not found or already assigned
    /// - `Err(DbErr)`: Database error
    pub async fn assign(&self, params: AssignEventParams) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::update_many()
            .col_expr(entity::event::Column::Name, Expr::value(params.name))
            .col_expr(
                entity::event::Column::CreatorId,
                Expr::value(params.creator_id.to_string()),
            )
            .col_expr(
                entity::event::Column::CreatorName,
                Expr::value(params.creator_name),
            )
            .filter(entity::event::Column::Id.eq(params.event_id))
            .filter(entity::event::Column::Name.eq(""))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
