//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits
//! between the bot command layer and the data (repository) layer. Services
//! are responsible for:
//!
//! - **Business Logic**: Validation, candidate selection, winner selection
//! - **Orchestration**: Coordinating repositories and the Discord providers
//! - **Domain Models**: Working with domain models rather than entity models

pub mod answer_format;
pub mod attribution;
pub mod discord_provider;
pub mod discovery;
pub mod event_population;
pub mod poll;
pub mod provider;
pub mod tag_catalog;

#[cfg(test)]
mod test;
