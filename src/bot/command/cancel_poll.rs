//! `/cancelpoll` - cancel an active mission poll.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateAutocompleteResponse, CreateCommand,
    CreateCommandOption,
};
use std::sync::Arc;

use crate::bot::command::{int_option, mission_poll::active_poll_choices, reply_ephemeral};
use crate::error::AppError;
use crate::service::discord_provider::DiscordProvider;
use crate::service::poll::{PollError, PollService};
use crate::service::tag_catalog::TagCatalogCache;

pub fn register() -> CreateCommand {
    CreateCommand::new("cancelpoll")
        .description("Cancel an active mission poll")
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "poll", "The active poll")
                .required(true)
                .set_autocomplete(true),
        )
}

pub async fn run(
    ctx: &Context,
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
    tag_cache: &Arc<TagCatalogCache>,
) -> Result<(), AppError> {
    let Some(guild_id) = interaction.guild_id else {
        reply_ephemeral(ctx, interaction, "This command only works in a server.").await;
        return Ok(());
    };
    let Some(poll_id) = int_option(interaction, "poll") else {
        reply_ephemeral(ctx, interaction, "Missing required options.").await;
        return Ok(());
    };

    let provider = DiscordProvider::new(ctx.http.clone(), db.clone());
    let service = PollService::new(db, &provider, &provider, &provider, &provider, tag_cache);

    let content = match service.cancel_poll(guild_id.get(), poll_id as i32).await {
        Ok(poll) => format!("Poll #{} has been cancelled.", poll.id),
        Err(PollError::Db(e)) => return Err(e.into()),
        Err(e) => e.to_string(),
    };
    reply_ephemeral(ctx, interaction, &content).await;
    Ok(())
}

pub async fn autocomplete(
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
) -> CreateAutocompleteResponse {
    let response = CreateAutocompleteResponse::new();
    let Some(guild_id) = interaction.guild_id else {
        return response;
    };
    active_poll_choices(db, guild_id.get(), response).await
}
