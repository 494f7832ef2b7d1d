pub mod event;
pub mod mission_poll;
pub mod schedule_config;

pub mod prelude;
