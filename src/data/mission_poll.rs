use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionError, TransactionTrait,
};

use crate::model::mission_poll::{CreatePollParams, MissionPoll, PollStatus, RecentWinner};

/// Decodes a poll row into the domain model, surfacing corrupt rows as
/// database errors.
fn poll_from_entity(entity: entity::mission_poll::Model) -> Result<MissionPoll, DbErr> {
    MissionPoll::from_entity(entity).map_err(DbErr::Custom)
}

pub struct MissionPollRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MissionPollRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active poll unless the target event already has one.
    ///
    /// The existence check and the insert run in a single transaction so two
    /// near-simultaneous creation requests for the same event cannot both
    /// pass the check.
    ///
    /// # Arguments
    /// - `params`: Poll attributes; `mission_thread_ids` is persisted as an
    ///   order-preserving JSON array
    ///
    /// # Returns
    /// - `Ok(Some(poll))`: Poll created with status `active`
    /// - `Ok(None)`: An active poll already targets this event
    /// - `Err(DbErr)`: Database error
    pub async fn insert_if_no_active(
        &self,
        params: CreatePollParams,
    ) -> Result<Option<MissionPoll>, DbErr> {
        let thread_ids_json = serde_json::to_string(&params.mission_thread_ids)
            .map_err(|e| DbErr::Custom(format!("failed to encode mission_thread_ids: {}", e)))?;

        let created = self
            .db
            .transaction::<_, Option<entity::mission_poll::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let existing = entity::prelude::MissionPoll::find()
                        .filter(
                            entity::mission_poll::Column::TargetEventId.eq(params.target_event_id),
                        )
                        .filter(entity::mission_poll::Column::Status.eq(PollStatus::Active.as_str()))
                        .one(txn)
                        .await?;

                    if existing.is_some() {
                        return Ok(None);
                    }

                    let poll = entity::mission_poll::ActiveModel {
                        guild_id: ActiveValue::Set(params.guild_id.to_string()),
                        poll_message_id: ActiveValue::Set(params.poll_message_id.to_string()),
                        channel_id: ActiveValue::Set(params.channel_id.to_string()),
                        target_event_id: ActiveValue::Set(params.target_event_id),
                        framework_filter: ActiveValue::Set(params.framework_filter),
                        composition_filter: ActiveValue::Set(params.composition_filter),
                        mission_thread_ids: ActiveValue::Set(thread_ids_json),
                        poll_end_time: ActiveValue::Set(params.poll_end_time),
                        status: ActiveValue::Set(PollStatus::Active.as_str().to_string()),
                        winning_thread_id: ActiveValue::Set(None),
                        created_by: ActiveValue::Set(params.created_by.to_string()),
                        created_at: ActiveValue::Set(Utc::now()),
                        links_message_id: ActiveValue::Set(
                            params.links_message_id.map(|id| id.to_string()),
                        ),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    Ok(Some(poll))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => e,
                TransactionError::Transaction(e) => e,
            })?;

        created.map(poll_from_entity).transpose()
    }

    /// Gets a poll by ID.
    ///
    /// # Returns
    /// - `Ok(Some(poll))`: The poll
    /// - `Ok(None)`: Poll not found
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<MissionPoll>, DbErr> {
        let poll = entity::prelude::MissionPoll::find_by_id(id)
            .one(self.db)
            .await?;

        poll.map(poll_from_entity).transpose()
    }

    /// Gets active polls, optionally restricted to a guild, ordered by end time.
    ///
    /// # Returns
    /// - `Ok(polls)`: Active polls
    /// - `Err(DbErr)`: Database error
    pub async fn get_active(&self, guild_id: Option<u64>) -> Result<Vec<MissionPoll>, DbErr> {
        let mut query = entity::prelude::MissionPoll::find()
            .filter(entity::mission_poll::Column::Status.eq(PollStatus::Active.as_str()));

        if let Some(guild_id) = guild_id {
            query = query.filter(entity::mission_poll::Column::GuildId.eq(guild_id.to_string()));
        }

        let polls = query
            .order_by_asc(entity::mission_poll::Column::PollEndTime)
            .all(self.db)
            .await?;

        polls.into_iter().map(poll_from_entity).collect()
    }

    /// Gets the active poll targeting an event, if any.
    ///
    /// # Returns
    /// - `Ok(Some(poll))`: Active poll for the event
    /// - `Ok(None)`: No active poll targets the event
    /// - `Err(DbErr)`: Database error
    pub async fn get_active_for_event(
        &self,
        target_event_id: i32,
    ) -> Result<Option<MissionPoll>, DbErr> {
        let poll = entity::prelude::MissionPoll::find()
            .filter(entity::mission_poll::Column::TargetEventId.eq(target_event_id))
            .filter(entity::mission_poll::Column::Status.eq(PollStatus::Active.as_str()))
            .one(self.db)
            .await?;

        poll.map(poll_from_entity).transpose()
    }

    /// Gets active polls whose end time has passed, ordered by end time.
    ///
    /// # Arguments
    /// - `now`: Current time; polls with `poll_end_time <= now` are due
    ///
    /// # Returns
    /// - `Ok(polls)`: Due polls across all guilds
    /// - `Err(DbErr)`: Database error
    pub async fn get_due(&self, now: DateTime<Utc>) -> Result<Vec<MissionPoll>, DbErr> {
        let polls = entity::prelude::MissionPoll::find()
            .filter(entity::mission_poll::Column::Status.eq(PollStatus::Active.as_str()))
            .filter(entity::mission_poll::Column::PollEndTime.lte(now))
            .order_by_asc(entity::mission_poll::Column::PollEndTime)
            .all(self.db)
            .await?;

        polls.into_iter().map(poll_from_entity).collect()
    }

    /// Gets winners of completed polls joined with their target event dates.
    ///
    /// Used to build the two-week deduplication window, which is keyed to the
    /// target event's date rather than the poll's resolution time.
    ///
    /// # Returns
    /// - `Ok(winners)`: Winning thread ids with target event dates
    /// - `Err(DbErr)`: Database error
    pub async fn get_recent_winners(&self, guild_id: u64) -> Result<Vec<RecentWinner>, DbErr> {
        let rows = entity::prelude::MissionPoll::find()
            .filter(entity::mission_poll::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::mission_poll::Column::Status.eq(PollStatus::Completed.as_str()))
            .filter(entity::mission_poll::Column::WinningThreadId.is_not_null())
            .find_also_related(entity::prelude::Event)
            .all(self.db)
            .await?;

        let mut winners = Vec::new();
        for (poll, event) in rows {
            let Some(event) = event else {
                continue;
            };
            let Some(raw) = poll.winning_thread_id else {
                continue;
            };
            let winning_thread_id = raw
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("invalid winning_thread_id '{}': {}", raw, e)))?;
            winners.push(RecentWinner {
                winning_thread_id,
                event_date: event.date,
            });
        }

        Ok(winners)
    }

    /// Marks a poll completed with its winning thread recorded.
    ///
    /// # Returns
    /// - `Ok(())`: Status updated
    /// - `Err(DbErr)`: Database error or poll not found
    pub async fn mark_completed(&self, id: i32, winning_thread_id: u64) -> Result<(), DbErr> {
        let poll = entity::prelude::MissionPoll::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Mission poll {} not found", id)))?;

        let mut active_model: entity::mission_poll::ActiveModel = poll.into();
        active_model.status = ActiveValue::Set(PollStatus::Completed.as_str().to_string());
        active_model.winning_thread_id = ActiveValue::Set(Some(winning_thread_id.to_string()));
        active_model.update(self.db).await?;

        tracing::info!("Poll #{} marked completed, winner thread {}", id, winning_thread_id);

        Ok(())
    }

    /// Marks a poll failed.
    ///
    /// # Returns
    /// - `Ok(())`: Status updated
    /// - `Err(DbErr)`: Database error or poll not found
    pub async fn mark_failed(&self, id: i32) -> Result<(), DbErr> {
        let poll = entity::prelude::MissionPoll::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Mission poll {} not found", id)))?;

        let mut active_model: entity::mission_poll::ActiveModel = poll.into();
        active_model.status = ActiveValue::Set(PollStatus::Failed.as_str().to_string());
        active_model.update(self.db).await?;

        tracing::warn!("Poll #{} marked failed", id);

        Ok(())
    }
}
