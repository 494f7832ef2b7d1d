//! `/configure` - point the bot at the guild's channels.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::bot::command::{channel_option, reply_ephemeral};
use crate::data::schedule_config::ScheduleConfigRepository;
use crate::error::AppError;
use crate::model::schedule_config::UpsertScheduleConfigParams;

pub fn register() -> CreateCommand {
    CreateCommand::new("configure")
        .description("Configure the channels the bot works with")
        .add_option(CreateCommandOption::new(
            CommandOptionType::Channel,
            "briefings",
            "Forum channel holding mission briefing threads",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Channel,
            "log",
            "Channel for fallback notifications",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Channel,
            "schedule",
            "Channel holding the schedule display",
        ))
}

pub async fn run(
    ctx: &Context,
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
) -> Result<(), AppError> {
    let Some(guild_id) = interaction.guild_id else {
        reply_ephemeral(ctx, interaction, "This command only works in a server.").await;
        return Ok(());
    };

    let briefing_channel_id = channel_option(interaction, "briefings");
    let log_channel_id = channel_option(interaction, "log");
    let schedule_channel_id = channel_option(interaction, "schedule");
    if briefing_channel_id.is_none() && log_channel_id.is_none() && schedule_channel_id.is_none() {
        reply_ephemeral(ctx, interaction, "Pick at least one channel to configure.").await;
        return Ok(());
    }

    // Omitted fields keep their stored value; the schedule message id is
    // only ever written by the display itself.
    let config = ScheduleConfigRepository::new(db)
        .upsert(UpsertScheduleConfigParams {
            guild_id: guild_id.get(),
            briefing_channel_id,
            log_channel_id,
            schedule_channel_id,
            schedule_message_id: None,
        })
        .await?;

    let mut parts = Vec::new();
    if let Some(id) = config.briefing_channel_id {
        parts.push(format!("briefings <#{}>", id));
    }
    if let Some(id) = config.log_channel_id {
        parts.push(format!("log <#{}>", id));
    }
    if let Some(id) = config.schedule_channel_id {
        parts.push(format!("schedule <#{}>", id));
    }
    reply_ephemeral(
        ctx,
        interaction,
        &format!("Configuration saved: {}.", parts.join(", ")),
    )
    .await;
    Ok(())
}
