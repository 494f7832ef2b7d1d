//! Domain model for per-guild channel configuration.

/// Channels the bot has been pointed at for a guild via `/configure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Discord guild id (stored as String).
    pub guild_id: String,
    /// Forum channel holding mission briefing threads.
    pub briefing_channel_id: Option<String>,
    /// Channel receiving fallback notifications when DMs fail.
    pub log_channel_id: Option<String>,
    /// Channel holding the schedule display message.
    pub schedule_channel_id: Option<String>,
    /// Message id of the schedule display embed.
    pub schedule_message_id: Option<String>,
}

impl ScheduleConfig {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::schedule_config::Model) -> Self {
        Self {
            guild_id: entity.guild_id,
            briefing_channel_id: entity.briefing_channel_id,
            log_channel_id: entity.log_channel_id,
            schedule_channel_id: entity.schedule_channel_id,
            schedule_message_id: entity.schedule_message_id,
        }
    }
}

/// Parameters for upserting a guild's channel configuration.
#[derive(Debug, Clone, Default)]
pub struct UpsertScheduleConfigParams {
    /// Discord guild id.
    pub guild_id: u64,
    /// Forum channel holding mission briefing threads.
    pub briefing_channel_id: Option<u64>,
    /// Channel receiving fallback notifications when DMs fail.
    pub log_channel_id: Option<u64>,
    /// Channel holding the schedule display message.
    pub schedule_channel_id: Option<u64>,
    /// Message id of the schedule display embed.
    pub schedule_message_id: Option<u64>,
}
