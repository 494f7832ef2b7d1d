//! Domain models for mission polls.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::candidate::ForumThread;

/// Poll lifecycle status. `Completed` and `Failed` are terminal; a poll never
/// returns to `Active` once it has left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Active,
    Completed,
    Failed,
}

impl PollStatus {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PollStatus::Active => "active",
            PollStatus::Completed => "completed",
            PollStatus::Failed => "failed",
        }
    }

    /// Parses the database string representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(PollStatus::Active),
            "completed" => Some(PollStatus::Completed),
            "failed" => Some(PollStatus::Failed),
            _ => None,
        }
    }
}

/// A poll option: the candidate thread and the answer text rendered for it.
///
/// Options are carried as one ordered list from creation through storage to
/// resolution; the list index is the poll answer index.
#[derive(Debug, Clone)]
pub struct PollOption {
    /// The candidate briefing thread.
    pub thread: ForumThread,
    /// Rendered answer text, within the 55-character poll budget.
    pub answer_text: String,
    /// Composition tags of the thread (framework tag excluded).
    pub composition_tags: Vec<String>,
}

/// A mission poll domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionPoll {
    /// Unique identifier for the poll.
    pub id: i32,
    /// Discord guild id (stored as String).
    pub guild_id: String,
    /// Message id of the rendered Discord poll (stored as String).
    pub poll_message_id: String,
    /// Channel the poll message lives in (stored as String).
    pub channel_id: String,
    /// ID of the event the poll resolves into.
    pub target_event_id: i32,
    /// Framework tag the candidates were filtered by.
    pub framework_filter: String,
    /// Composition tag filter, or the "All" sentinel.
    pub composition_filter: String,
    /// Thread ids in poll answer order; index i is answer i.
    pub mission_thread_ids: Vec<u64>,
    /// Scheduled end of the vote.
    pub poll_end_time: DateTime<Utc>,
    /// Lifecycle status.
    pub status: PollStatus,
    /// Winning thread id, set iff status is `Completed`.
    pub winning_thread_id: Option<u64>,
    /// Discord id of the poll creator (stored as String).
    pub created_by: String,
    /// Timestamp when the poll was created.
    pub created_at: DateTime<Utc>,
    /// Message id of the companion briefing-links embed, if it was posted.
    pub links_message_id: Option<String>,
}

impl MissionPoll {
    /// Converts an entity model to a poll domain model at the repository boundary.
    ///
    /// Fails if the stored status string or the thread-id JSON array cannot
    /// be decoded; both indicate a corrupt row.
    pub fn from_entity(entity: entity::mission_poll::Model) -> Result<Self, String> {
        let status = PollStatus::parse(&entity.status)
            .ok_or_else(|| format!("unknown poll status '{}'", entity.status))?;
        let mission_thread_ids: Vec<u64> = serde_json::from_str(&entity.mission_thread_ids)
            .map_err(|e| format!("invalid mission_thread_ids JSON: {}", e))?;
        let winning_thread_id = match entity.winning_thread_id {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|e| format!("invalid winning_thread_id '{}': {}", raw, e))?,
            ),
            None => None,
        };

        Ok(Self {
            id: entity.id,
            guild_id: entity.guild_id,
            poll_message_id: entity.poll_message_id,
            channel_id: entity.channel_id,
            target_event_id: entity.target_event_id,
            framework_filter: entity.framework_filter,
            composition_filter: entity.composition_filter,
            mission_thread_ids,
            poll_end_time: entity.poll_end_time,
            status,
            winning_thread_id,
            created_by: entity.created_by,
            created_at: entity.created_at,
            links_message_id: entity.links_message_id,
        })
    }
}

/// Parameters for persisting a newly created poll.
#[derive(Debug, Clone)]
pub struct CreatePollParams {
    /// Discord guild id.
    pub guild_id: u64,
    /// Message id of the rendered Discord poll.
    pub poll_message_id: u64,
    /// Channel the poll message was sent to.
    pub channel_id: u64,
    /// ID of the event the poll resolves into.
    pub target_event_id: i32,
    /// Framework tag filter used to build the option set.
    pub framework_filter: String,
    /// Composition tag filter, or "All".
    pub composition_filter: String,
    /// Thread ids in poll answer order.
    pub mission_thread_ids: Vec<u64>,
    /// Scheduled end of the vote.
    pub poll_end_time: DateTime<Utc>,
    /// Discord id of the poll creator.
    pub created_by: u64,
    /// Message id of the briefing-links embed, if it was posted.
    pub links_message_id: Option<u64>,
}

/// A completed poll's winner joined with its target event date, used for the
/// two-week deduplication window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentWinner {
    /// Thread id that won the poll.
    pub winning_thread_id: u64,
    /// Date of the event the poll was scheduled into.
    pub event_date: NaiveDate,
}
