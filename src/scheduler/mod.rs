//! Cron jobs for automated tasks.

pub mod poll_monitor;
