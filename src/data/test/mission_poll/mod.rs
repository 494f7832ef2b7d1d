use crate::data::mission_poll::MissionPollRepository;
use crate::model::mission_poll::{CreatePollParams, PollStatus};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_active;
mod get_due;
mod get_recent_winners;
mod insert_if_no_active;
mod mark_completed;
mod mark_failed;

/// Default creation parameters targeting the given event.
fn poll_params(guild_id: u64, target_event_id: i32) -> CreatePollParams {
    CreatePollParams {
        guild_id,
        poll_message_id: 900_001,
        channel_id: 800_001,
        target_event_id,
        framework_filter: "Framework 5.0".to_string(),
        composition_filter: "All".to_string(),
        mission_thread_ids: vec![1_001, 1_002, 1_003],
        poll_end_time: Utc::now() + Duration::hours(24),
        created_by: 700_001,
        links_message_id: None,
    }
}
