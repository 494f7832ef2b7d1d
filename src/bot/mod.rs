//! Discord bot integration for guild schedule management.
//!
//! The bot registers the guild slash commands on startup and dispatches
//! interactions to the command handlers. It runs in its own tokio task; its
//! HTTP client is shared with the poll monitor scheduler so both sides talk
//! to Discord over one connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - guild availability and slash command interactions
//! - `GUILD_MESSAGES` - posting and deleting poll messages

pub mod command;
pub mod start;
