use sea_orm::DatabaseConnection;
use serenity::all::{
    ActivityData, Client, Context, EventHandler, GatewayIntents, Guild, Interaction, Ready,
};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{error, info};

use crate::bot::command;
use crate::config::Config;
use crate::error::AppError;
use crate::service::tag_catalog::TagCatalogCache;

/// Discord bot event handler
struct Handler {
    db: DatabaseConnection,
    tag_cache: Arc<TagCatalogCache>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::custom("Counting votes")));

        // Commands are registered per guild so changes show up immediately
        // instead of waiting out the global propagation delay.
        for guild in &ready.guilds {
            if let Err(e) = guild.id.set_commands(&ctx.http, command::all_commands()).await {
                error!("Failed to register commands in guild {}: {}", guild.id, e);
            }
        }
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new == Some(true) {
            info!("Joined new guild: {} ({})", guild.name, guild.id);
            if let Err(e) = guild.id.set_commands(&ctx.http, command::all_commands()).await {
                error!("Failed to register commands in guild {}: {}", guild.id, e);
            }
        }
    }

    /// Called for every slash command and autocomplete interaction
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command_interaction) => {
                command::dispatch(&ctx, &command_interaction, &self.db, &self.tag_cache).await;
            }
            Interaction::Autocomplete(autocomplete_interaction) => {
                command::dispatch_autocomplete(
                    &ctx,
                    &autocomplete_interaction,
                    &self.db,
                    &self.tag_cache,
                )
                .await;
            }
            _ => {}
        }
    }
}

/// Builds the Discord client and hands back its HTTP handle.
///
/// The HTTP handle is shared with the poll monitor scheduler so it can post
/// and delete messages without a second gateway connection.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the event handlers
/// - `tag_cache` - Shared forum tag catalog cache
///
/// # Returns
/// - `Ok((client, http))` - Client ready to start, plus its HTTP handle
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    tag_cache: Arc<TagCatalogCache>,
) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler { db, tag_cache };

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner
///
/// This function should be called from within a tokio::spawn task since it
/// blocks until the bot shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
