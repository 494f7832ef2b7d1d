mod event;
mod mission_poll;
mod schedule_config;
