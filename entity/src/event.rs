use sea_orm::entity::prelude::*;

/// A calendar slot on the guild schedule. An empty `name` means the slot is
/// still unassigned and can host a mission poll.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub date: Date,
    pub event_type: String,
    pub name: String,
    pub creator_id: String,
    pub creator_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mission_poll::Entity")]
    MissionPoll,
}

impl Related<super::mission_poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MissionPoll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
