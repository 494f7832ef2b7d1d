//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with
//! sensible defaults, reducing boilerplate in tests. Factories handle
//! foreign key relationships, making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let event = factory::event::create_event(&db, 100).await?;
//!     let poll = factory::mission_poll::create_poll(&db, 100, event.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! let poll = factory::mission_poll::MissionPollFactory::new(&db, 100, event.id)
//!     .status("completed")
//!     .winning_thread_id(Some(42))
//!     .build()
//!     .await?;
//! ```

pub mod event;
pub mod helpers;
pub mod mission_poll;
pub mod schedule_config;
