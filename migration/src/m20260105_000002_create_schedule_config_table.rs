use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduleConfig::Table)
                    .if_not_exists()
                    .col(string(ScheduleConfig::GuildId).primary_key())
                    .col(string_null(ScheduleConfig::BriefingChannelId))
                    .col(string_null(ScheduleConfig::LogChannelId))
                    .col(string_null(ScheduleConfig::ScheduleChannelId))
                    .col(string_null(ScheduleConfig::ScheduleMessageId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduleConfig {
    Table,
    GuildId,
    BriefingChannelId,
    LogChannelId,
    ScheduleChannelId,
    ScheduleMessageId,
}
