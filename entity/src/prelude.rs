pub use super::event::Entity as Event;
pub use super::mission_poll::Entity as MissionPoll;
pub use super::schedule_config::Entity as ScheduleConfig;
