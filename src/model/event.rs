//! Domain models for schedule events.

use chrono::NaiveDate;

/// A calendar slot on the guild schedule.
///
/// At most one event exists per (guild, date, event_type). An empty `name`
/// means the slot has no mission assigned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique identifier for the event.
    pub id: i32,
    /// Discord guild id (stored as String).
    pub guild_id: String,
    /// Calendar date of the slot (no time component).
    pub date: NaiveDate,
    /// Slot category, e.g. "Training" or "Mission".
    pub event_type: String,
    /// Assigned mission name; empty string when unassigned.
    pub name: String,
    /// Discord id of the assigning user (stored as String, "0" for the poll system).
    pub creator_id: String,
    /// Display name of the mission creator.
    pub creator_name: String,
}

impl Event {
    /// Converts an entity model to an event domain model at the repository boundary.
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            guild_id: entity.guild_id,
            date: entity.date,
            event_type: entity.event_type,
            name: entity.name,
            creator_id: entity.creator_id,
            creator_name: entity.creator_name,
        }
    }

    /// Whether the slot still has no mission assigned.
    pub fn is_unassigned(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Parameters for assigning a mission to an event slot.
#[derive(Debug, Clone)]
pub struct AssignEventParams {
    /// ID of the event to assign.
    pub event_id: i32,
    /// Mission name to write into the slot.
    pub name: String,
    /// Discord id of the assigning user (0 for the poll system).
    pub creator_id: u64,
    /// Display name of the mission creator.
    pub creator_name: String,
}
