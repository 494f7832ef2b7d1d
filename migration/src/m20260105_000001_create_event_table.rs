use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::GuildId))
                    .col(date(Event::Date))
                    .col(string(Event::EventType))
                    .col(string(Event::Name))
                    .col(string(Event::CreatorId))
                    .col(string(Event::CreatorName))
                    .to_owned(),
            )
            .await?;

        // One slot per guild, date, and event type
        manager
            .create_index(
                Index::create()
                    .name("idx_event_guild_date_type")
                    .table(Event::Table)
                    .col(Event::GuildId)
                    .col(Event::Date)
                    .col(Event::EventType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    GuildId,
    Date,
    EventType,
    Name,
    CreatorId,
    CreatorName,
}
