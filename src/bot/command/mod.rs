//! Slash command definitions and dispatch.

pub mod cancel_poll;
pub mod configure;
pub mod mission_poll;
pub mod populate;

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, Context, CreateAutocompleteResponse, CreateCommand,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::service::tag_catalog::TagCatalogCache;

/// All slash commands, registered per guild on startup.
pub fn all_commands() -> Vec<CreateCommand> {
    vec![
        mission_poll::register(),
        cancel_poll::register(),
        configure::register(),
        populate::register(),
    ]
}

/// Dispatches a slash command interaction to its handler.
pub async fn dispatch(
    ctx: &Context,
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
    tag_cache: &Arc<TagCatalogCache>,
) {
    if !has_manage_permission(interaction) {
        reply_ephemeral(
            ctx,
            interaction,
            "You need the Manage Server permission to use this command.",
        )
        .await;
        return;
    }

    let result = match interaction.data.name.as_str() {
        "missionpoll" => mission_poll::run(ctx, interaction, db, tag_cache).await,
        "cancelpoll" => cancel_poll::run(ctx, interaction, db, tag_cache).await,
        "configure" => configure::run(ctx, interaction, db).await,
        "populate" => populate::run(ctx, interaction, db).await,
        other => {
            warn!("Received unknown command: {}", other);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(
            command = %interaction.data.name,
            "Command handler failed: {}",
            e
        );
        reply_ephemeral(
            ctx,
            interaction,
            "Something went wrong handling that command.",
        )
        .await;
    }
}

/// Dispatches an autocomplete interaction to its handler.
pub async fn dispatch_autocomplete(
    ctx: &Context,
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
    tag_cache: &Arc<TagCatalogCache>,
) {
    let suggestions = match interaction.data.name.as_str() {
        "missionpoll" => mission_poll::autocomplete(ctx, interaction, db, tag_cache).await,
        "cancelpoll" => cancel_poll::autocomplete(interaction, db).await,
        _ => CreateAutocompleteResponse::new(),
    };

    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(suggestions))
        .await
    {
        warn!("Failed to send autocomplete response: {}", e);
    }
}

/// Whether the invoking member holds Manage Server in the guild.
fn has_manage_permission(interaction: &CommandInteraction) -> bool {
    interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.manage_guild())
        .unwrap_or(false)
}

/// Sends an ephemeral reply; failures are logged, not propagated.
pub async fn reply_ephemeral(ctx: &Context, interaction: &CommandInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(e) = interaction.create_response(&ctx.http, response).await {
        warn!("Failed to send command reply: {}", e);
    }
}

/// Looks up a string option by name.
pub fn str_option<'a>(interaction: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    interaction
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

/// Looks up an integer option by name.
pub fn int_option(interaction: &CommandInteraction, name: &str) -> Option<i64> {
    interaction
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

/// Looks up a channel option by name.
pub fn channel_option(interaction: &CommandInteraction, name: &str) -> Option<u64> {
    interaction
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_channel_id())
        .map(|channel| channel.get())
}
