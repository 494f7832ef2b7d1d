//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary
//! so the service layer never touches SeaORM types directly. Ephemeral
//! Discord-sourced data (forum threads, poll options) lives here too.

pub mod candidate;
pub mod event;
pub mod mission_poll;
pub mod schedule_config;
