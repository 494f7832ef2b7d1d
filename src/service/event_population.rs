//! Weekly event slot population.
//!
//! The schedule runs on a fixed weekly rhythm: a Training slot every
//! Wednesday and a Mission slot every Saturday. Population is idempotent,
//! re-running it only fills the gaps.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::data::event::EventRepository;
use crate::model::event::Event;

/// How far ahead slots are created, in weeks.
pub const POPULATE_WEEKS_AHEAD: u64 = 4;

/// The weekly slot templates, in schedule order.
pub const WEEKLY_SLOTS: &[(Weekday, &str)] =
    &[(Weekday::Wed, "Training"), (Weekday::Sat, "Mission")];

/// Slots created by a population run.
#[derive(Debug, Clone, Default)]
pub struct PopulationReport {
    pub created: Vec<Event>,
    pub already_present: usize,
}

/// The dates within `[today, today + weeks_ahead * 7)` falling on `weekday`.
fn upcoming_dates(today: NaiveDate, weekday: Weekday, weeks_ahead: u64) -> Vec<NaiveDate> {
    let horizon = today + Days::new(weeks_ahead * 7);
    let mut dates = Vec::new();
    let mut date = today;
    while date < horizon {
        if date.weekday() == weekday {
            dates.push(date);
        }
        date = date + Days::new(1);
    }
    dates
}

/// Creates the missing weekly slots for a guild over the coming weeks.
pub async fn populate_weekly_slots(
    db: &DatabaseConnection,
    guild_id: u64,
    today: NaiveDate,
) -> Result<PopulationReport, DbErr> {
    let repo = EventRepository::new(db);
    let mut report = PopulationReport::default();

    for &(weekday, event_type) in WEEKLY_SLOTS {
        for date in upcoming_dates(today, weekday, POPULATE_WEEKS_AHEAD) {
            let (created, event) = repo.create_if_absent(guild_id, date, event_type).await?;
            if created {
                report.created.push(event);
            } else {
                report.already_present += 1;
            }
        }
    }

    info!(
        guild_id,
        created = report.created.len(),
        existing = report.already_present,
        "Populated weekly event slots"
    );
    Ok(report)
}
