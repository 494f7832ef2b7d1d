//! Ephemeral candidate data fetched from the briefing forum.

/// A mission briefing thread fetched from the configured forum channel.
///
/// Candidates are never persisted; they are fetched fresh for every poll
/// creation request and re-fetched by id during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    /// Discord thread id.
    pub id: u64,
    /// Thread title, used as the mission name.
    pub name: String,
    /// Applied forum tag names (framework and composition mixed).
    pub labels: Vec<String>,
    /// Discord id of the thread owner, if known.
    pub owner_id: Option<u64>,
    /// Display name of the thread owner, if resolvable.
    pub owner_name: Option<String>,
    /// Content of the thread's starter message, if fetchable.
    pub opening_body: Option<String>,
}
