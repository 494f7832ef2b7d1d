use sea_orm::entity::prelude::*;

/// A mission poll row. `mission_thread_ids` is a JSON array of forum thread
/// ids whose order matches the rendered poll answers exactly; the answer
/// index is the join key back to the candidate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mission_poll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub poll_message_id: String,
    pub channel_id: String,
    pub target_event_id: i32,
    pub framework_filter: String,
    pub composition_filter: String,
    #[sea_orm(column_type = "Text")]
    pub mission_thread_ids: String,
    pub poll_end_time: DateTimeUtc,
    pub status: String,
    pub winning_thread_id: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeUtc,
    pub links_message_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::TargetEventId",
        to = "super::event::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
