use sea_orm::entity::prelude::*;

/// Per-guild channel configuration written by `/configure`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub briefing_channel_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub schedule_channel_id: Option<String>,
    pub schedule_message_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
