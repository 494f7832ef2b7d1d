//! Database repository layer.
//!
//! Repository structs handle all database operations for each domain.
//! Repositories use SeaORM entity models internally and return domain models
//! to keep the service layer free of persistence concerns.

pub mod event;
pub mod mission_poll;
pub mod schedule_config;

#[cfg(test)]
mod test;
