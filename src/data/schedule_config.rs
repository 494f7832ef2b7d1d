use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
};

use crate::model::schedule_config::{ScheduleConfig, UpsertScheduleConfigParams};

pub struct ScheduleConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduleConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the channel configuration for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(config))`: The guild's configuration
    /// - `Ok(None)`: Guild has not been configured
    /// - `Err(DbErr)`: Database error
    pub async fn get(&self, guild_id: u64) -> Result<Option<ScheduleConfig>, DbErr> {
        let config = entity::prelude::ScheduleConfig::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(config.map(ScheduleConfig::from_entity))
    }

    /// Upserts a guild's channel configuration.
    ///
    /// Only fields provided as `Some` are written; existing values for
    /// omitted fields are preserved.
    ///
    /// # Returns
    /// - `Ok(config)`: The stored configuration after the write
    /// - `Err(DbErr)`: Database error
    pub async fn upsert(
        &self,
        params: UpsertScheduleConfigParams,
    ) -> Result<ScheduleConfig, DbErr> {
        let guild_id_str = params.guild_id.to_string();

        let existing = entity::prelude::ScheduleConfig::find_by_id(guild_id_str.clone())
            .one(self.db)
            .await?;

        let stored = match existing {
            Some(existing) => {
                let mut active_model = existing.into_active_model();
                if let Some(id) = params.briefing_channel_id {
                    active_model.briefing_channel_id = ActiveValue::Set(Some(id.to_string()));
                }
                if let Some(id) = params.log_channel_id {
                    active_model.log_channel_id = ActiveValue::Set(Some(id.to_string()));
                }
                if let Some(id) = params.schedule_channel_id {
                    active_model.schedule_channel_id = ActiveValue::Set(Some(id.to_string()));
                }
                if let Some(id) = params.schedule_message_id {
                    active_model.schedule_message_id = ActiveValue::Set(Some(id.to_string()));
                }
                active_model.update(self.db).await?
            }
            None => {
                entity::schedule_config::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id_str),
                    briefing_channel_id: ActiveValue::Set(
                        params.briefing_channel_id.map(|id| id.to_string()),
                    ),
                    log_channel_id: ActiveValue::Set(params.log_channel_id.map(|id| id.to_string())),
                    schedule_channel_id: ActiveValue::Set(
                        params.schedule_channel_id.map(|id| id.to_string()),
                    ),
                    schedule_message_id: ActiveValue::Set(
                        params.schedule_message_id.map(|id| id.to_string()),
                    ),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(ScheduleConfig::from_entity(stored))
    }
}
