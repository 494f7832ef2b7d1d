//! Poll cancellation, the admin escape hatch for an active poll.

use tracing::{info, warn};

use crate::data::mission_poll::MissionPollRepository;
use crate::model::mission_poll::MissionPoll;
use crate::service::poll::{PollError, PollService};

impl PollService<'_> {
    /// Cancels an active poll: marks it failed and tears the messages down.
    ///
    /// The status write happens first; message cleanup is best effort, so a
    /// Discord hiccup can leave a stale message behind but never a poll the
    /// monitor would still try to resolve.
    pub async fn cancel_poll(&self, guild_id: u64, poll_id: i32) -> Result<MissionPoll, PollError> {
        let poll_repo = MissionPollRepository::new(self.db);

        let poll = poll_repo
            .get_active(Some(guild_id))
            .await?
            .into_iter()
            .find(|p| p.id == poll_id)
            .ok_or(PollError::PollNotFound)?;

        poll_repo.mark_failed(poll.id).await?;
        info!(poll_id = poll.id, guild_id, "Poll cancelled");

        if let (Ok(channel_id), Ok(message_id)) =
            (poll.channel_id.parse::<u64>(), poll.poll_message_id.parse::<u64>())
        {
            if let Err(e) = self.vote.delete(channel_id, message_id).await {
                warn!(poll_id = poll.id, "Failed to delete cancelled poll message: {}", e);
            }
            let links_id = poll
                .links_message_id
                .as_ref()
                .and_then(|id| id.parse::<u64>().ok());
            if let Some(links_id) = links_id {
                if let Err(e) = self.vote.delete(channel_id, links_id).await {
                    warn!(poll_id = poll.id, "Failed to delete cancelled links message: {}", e);
                }
            }
        }

        Ok(poll)
    }
}
