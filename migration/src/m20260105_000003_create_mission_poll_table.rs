use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MissionPoll::Table)
                    .if_not_exists()
                    .col(pk_auto(MissionPoll::Id))
                    .col(string(MissionPoll::GuildId))
                    .col(string(MissionPoll::PollMessageId))
                    .col(string(MissionPoll::ChannelId))
                    .col(integer(MissionPoll::TargetEventId))
                    .col(string(MissionPoll::FrameworkFilter))
                    .col(string(MissionPoll::CompositionFilter))
                    // JSON array of thread ids, ordered to match the poll answers
                    .col(text(MissionPoll::MissionThreadIds))
                    .col(timestamp(MissionPoll::PollEndTime))
                    .col(string(MissionPoll::Status))
                    .col(string_null(MissionPoll::WinningThreadId))
                    .col(string(MissionPoll::CreatedBy))
                    .col(
                        timestamp(MissionPoll::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string_null(MissionPoll::LinksMessageId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mission_poll_target_event_id")
                            .from(MissionPoll::Table, MissionPoll::TargetEventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MissionPoll::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MissionPoll {
    Table,
    Id,
    GuildId,
    PollMessageId,
    ChannelId,
    TargetEventId,
    FrameworkFilter,
    CompositionFilter,
    MissionThreadIds,
    PollEndTime,
    Status,
    WinningThreadId,
    CreatedBy,
    CreatedAt,
    LinksMessageId,
}
