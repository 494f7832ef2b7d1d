//! `/missionpoll` - create a mission poll for an unassigned event slot.

use chrono::{Days, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateAutocompleteResponse, CreateCommand,
    CreateCommandOption, EditInteractionResponse,
};
use std::sync::Arc;

use crate::bot::command::{int_option, reply_ephemeral, str_option};
use crate::data::event::EventRepository;
use crate::data::mission_poll::MissionPollRepository;
use crate::data::schedule_config::ScheduleConfigRepository;
use crate::error::AppError;
use crate::service::answer_format::format_event_date;
use crate::service::discord_provider::DiscordProvider;
use crate::service::poll::create::CreatePollRequest;
use crate::service::poll::{PollError, PollService, POLL_DURATIONS_HOURS};
use crate::service::tag_catalog::TagCatalogCache;

/// How far ahead the event autocomplete looks, in days.
const EVENT_LOOKAHEAD_DAYS: u64 = 60;

/// Default number of poll options when the user does not pick one.
const DEFAULT_OPTION_COUNT: i64 = 5;

pub fn register() -> CreateCommand {
    let mut duration = CreateCommandOption::new(
        CommandOptionType::Integer,
        "duration",
        "How long the vote runs",
    )
    .required(true);
    for &hours in POLL_DURATIONS_HOURS {
        duration = duration.add_int_choice(format!("{} hours", hours), hours as i32);
    }

    CreateCommand::new("missionpoll")
        .description("Create a mission poll for an open event slot")
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "event", "The open event slot")
                .required(true)
                .set_autocomplete(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "framework",
                "Framework tag to filter missions by",
            )
            .required(true)
            .set_autocomplete(true),
        )
        .add_option(duration)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "composition",
                "Composition tag to filter missions by (default: All)",
            )
            .set_autocomplete(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "options",
                "Number of missions on the poll (default: 5)",
            )
            .min_int_value(3)
            .max_int_value(10),
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
    let (Some(event_id), Some(framework)) = (
        int_option(interaction, "event"),
        str_option(interaction, "framework"),
    ) else {
        reply_ephemeral(ctx, interaction, "Missing required options.").await;
        return Ok(());
    };
    let composition = str_option(interaction, "composition").unwrap_or("All");
    let duration_hours = int_option(interaction, "duration").unwrap_or(24) as u32;
    let requested_options = int_option(interaction, "options").unwrap_or(DEFAULT_OPTION_COUNT);

    // Candidate discovery hits the Discord API and can outlive the three
    // second interaction window, so acknowledge first.
    interaction.defer_ephemeral(&ctx.http).await?;

    let provider = DiscordProvider::new(ctx.http.clone(), db.clone());
    let service = PollService::new(db, &provider, &provider, &provider, &provider, tag_cache);
    let mut rng = StdRng::from_os_rng();

    let request = CreatePollRequest {
        guild_id: guild_id.get(),
        channel_id: interaction.channel_id.get(),
        target_event_id: event_id as i32,
        framework: framework.to_string(),
        composition: composition.to_string(),
        duration_hours,
        requested_options: requested_options as usize,
        created_by: interaction.user.id.get(),
    };

    let content = match service.create_poll(request, &mut rng).await {
        Ok(created) => format!(
            "Poll #{} created for {} with {} options. Voting ends <t:{}:R>.",
            created.poll.id,
            created.event_label,
            created.option_count,
            created.poll.poll_end_time.timestamp()
        ),
        Err(PollError::Db(e)) => return Err(e.into()),
        Err(e) => e.to_string(),
    };

    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;
    Ok(())
}

pub async fn autocomplete(
    ctx: &Context,
    interaction: &CommandInteraction,
    db: &DatabaseConnection,
    tag_cache: &Arc<TagCatalogCache>,
) -> CreateAutocompleteResponse {
    let response = CreateAutocompleteResponse::new();
    let Some(guild_id) = interaction.guild_id else {
        return response;
    };
    let Some(focused) = interaction.data.autocomplete() else {
        return response;
    };

    match focused.name {
        "event" => {
            let today = Utc::now().date_naive();
            let horizon = today + Days::new(EVENT_LOOKAHEAD_DAYS);
            let events = EventRepository::new(db)
                .get_unassigned_in_range(guild_id.get(), today, horizon)
                .await
                .unwrap_or_default();
            events
                .iter()
                .take(25)
                .fold(response, |acc, event| {
                    let label =
                        format!("{} ({})", format_event_date(event.date), event.event_type);
                    acc.add_int_choice(label, i64::from(event.id))
                })
        }
        "framework" | "composition" => {
            let Some(channel) = briefing_channel(db, guild_id.get()).await else {
                return response;
            };
            let provider = DiscordProvider::new(ctx.http.clone(), db.clone());
            tag_cache.ensure(&provider, channel).await;

            let mut tags = if focused.name == "framework" {
                tag_cache.framework_tags(channel)
            } else {
                let mut composition = vec!["All".to_string()];
                composition.extend(tag_cache.composition_tags(channel));
                composition
            };
            let typed = focused.value.to_lowercase();
            tags.retain(|tag| tag.to_lowercase().starts_with(&typed));
            tags.iter()
                .take(25)
                .fold(response, |acc, tag| acc.add_string_choice(tag, tag))
        }
        _ => response,
    }
}

async fn briefing_channel(db: &DatabaseConnection, guild_id: u64) -> Option<u64> {
    let config = ScheduleConfigRepository::new(db)
        .get(guild_id)
        .await
        .ok()
        .flatten()?;
    config.briefing_channel_id?.parse().ok()
}

/// Shared by `/cancelpoll` autocomplete: labels the guild's active polls.
pub async fn active_poll_choices(
    db: &DatabaseConnection,
    guild_id: u64,
    response: CreateAutocompleteResponse,
) -> CreateAutocompleteResponse {
    let polls = MissionPollRepository::new(db)
        .get_active(Some(guild_id))
        .await
        .unwrap_or_default();

    let mut labelled = Vec::new();
    for poll in polls.iter().take(25) {
        let event = EventRepository::new(db)
            .get_by_id(poll.target_event_id)
            .await
            .ok()
            .flatten();
        let label = match event {
            Some(event) => format!(
                "#{} - {} ({}) [{}]",
                poll.id,
                format_event_date(event.date),
                event.event_type,
                poll.framework_filter
            ),
            None => format!("#{} [{}]", poll.id, poll.framework_filter),
        };
        labelled.push((label, i64::from(poll.id)));
    }

    labelled
        .into_iter()
        .fold(response, |acc, (label, id)| acc.add_int_choice(label, id))
}
