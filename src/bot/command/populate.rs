//! `/populate` - fill in the upcoming weekly event slots.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{CommandInteraction, Context, CreateCommand};

use crate::bot::command::reply_ephemeral;
use crate::error::AppError;
use crate::service::answer_format::format_event_date;
use crate::service::event_population::{populate_weekly_slots, POPULATE_WEEKS_AHEAD};

pub fn register() -> CreateCommand {
    CreateCommand::new("populate").description(format!(
        "Create the weekly event slots for the next {} weeks",
        POPULATE_WEEKS_AHEAD
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

    let today = Utc::now().date_naive();
    let report = populate_weekly_slots(db, guild_id.get(), today).await?;

    let content = if report.created.is_empty() {
        "All upcoming weekly slots already exist.".to_string()
    } else {
        let lines: Vec<String> = report
            .created
            .iter()
            .map(|event| format!("{} ({})", format_event_date(event.date), event.event_type))
            .collect();
        format!("Created {} slots:\n{}", lines.len(), lines.join("\n"))
    };
    reply_ephemeral(ctx, interaction, &content).await;
    Ok(())
}
