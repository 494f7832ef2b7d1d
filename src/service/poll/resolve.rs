//! Poll resolution: tally reading, winner selection and event application.

use rand::Rng;
use sea_orm::DbErr;
use tracing::{error, info, warn};

use crate::data::event::EventRepository;
use crate::data::mission_poll::MissionPollRepository;
use crate::model::event::AssignEventParams;
use crate::model::mission_poll::{MissionPoll, PollStatus};
use crate::service::answer_format::format_event_date;
use crate::service::attribution::extract_attribution;
use crate::service::poll::PollService;

/// Picks the winning answer index from a tally list.
///
/// All-zero tallies (including an empty list) fall back to a uniform pick
/// over the full option range. A tie for the highest count is broken
/// uniformly among the tied indices, so every tied option has equal odds.
pub fn select_winner(tallies: &[u64], option_count: usize, rng: &mut impl Rng) -> usize {
    if tallies.is_empty() || tallies.iter().all(|&count| count == 0) {
        return rng.random_range(0..option_count);
    }

    let max = *tallies.iter().max().unwrap_or(&0);
    let tied: Vec<usize> = tallies
        .iter()
        .enumerate()
        .filter(|(_, &count)| count == max)
        .map(|(index, _)| index)
        .collect();
    tied[rng.random_range(0..tied.len())]
}

impl PollService<'_> {
    /// Resolves one due poll to a terminal status.
    ///
    /// Every provider-side failure (poll message gone, winning thread
    /// deleted, DM undeliverable) drives the poll to `failed` or is absorbed
    /// as best effort; only database errors propagate. Re-running against a
    /// poll that has already reached a terminal status is a no-op.
    pub async fn resolve_poll(
        &self,
        poll: &MissionPoll,
        rng: &mut (impl Rng + Send),
    ) -> Result<(), DbErr> {
        if poll.status != PollStatus::Active {
            return Ok(());
        }

        let poll_repo = MissionPollRepository::new(self.db);

        let guild_id: u64 = match poll.guild_id.parse() {
            Ok(id) => id,
            Err(_) => {
                error!(poll_id = poll.id, "Poll row has an unparseable guild id");
                return poll_repo.mark_failed(poll.id).await;
            }
        };
        let (channel_id, message_id): (u64, u64) =
            match (poll.channel_id.parse(), poll.poll_message_id.parse()) {
                (Ok(c), Ok(m)) => (c, m),
                _ => {
                    error!(poll_id = poll.id, "Poll row has unparseable message ids");
                    return poll_repo.mark_failed(poll.id).await;
                }
            };
        let creator_id: Option<u64> = poll.created_by.parse().ok();
        let log_channel = self.log_channel_id(guild_id).await;

        let tallies = match self.vote.read_tallies(channel_id, message_id).await {
            Ok(Some(tallies)) => tallies,
            Ok(None) => {
                warn!(poll_id = poll.id, "Poll message was deleted before the vote ended");
                poll_repo.mark_failed(poll.id).await?;
                self.notify_creator(
                    creator_id,
                    log_channel,
                    &format!(
                        "Your mission poll #{} could not be resolved: the poll message \
                         was deleted before the vote ended.",
                        poll.id
                    ),
                )
                .await;
                return Ok(());
            }
            Err(e) => {
                warn!(poll_id = poll.id, "Failed to read poll tallies: {}", e);
                poll_repo.mark_failed(poll.id).await?;
                self.notify_creator(
                    creator_id,
                    log_channel,
                    &format!(
                        "Your mission poll #{} could not be resolved: the vote results \
                         could not be read.",
                        poll.id
                    ),
                )
                .await;
                return Ok(());
            }
        };

        let winner_index = select_winner(&tallies, poll.mission_thread_ids.len(), rng);
        let Some(&winning_thread_id) = poll.mission_thread_ids.get(winner_index) else {
            error!(
                poll_id = poll.id,
                winner_index,
                option_count = poll.mission_thread_ids.len(),
                "Winning answer index is outside the stored option list"
            );
            return poll_repo.mark_failed(poll.id).await;
        };

        let thread = match self.source.get_thread(winning_thread_id).await {
            Ok(Some(thread)) => thread,
            Ok(None) => {
                warn!(
                    poll_id = poll.id,
                    winning_thread_id, "Winning briefing thread no longer exists"
                );
                poll_repo.mark_failed(poll.id).await?;
                self.notify_creator(
                    creator_id,
                    log_channel,
                    &format!(
                        "Your mission poll #{} ended, but the winning briefing thread \
                         was deleted and the mission could not be scheduled.",
                        poll.id
                    ),
                )
                .await;
                return Ok(());
            }
            Err(e) => {
                warn!(
                    poll_id = poll.id,
                    winning_thread_id, "Failed to fetch winning thread: {}", e
                );
                return poll_repo.mark_failed(poll.id).await;
            }
        };

        let event_repo = EventRepository::new(self.db);
        let Some(event) = event_repo.get_by_id(poll.target_event_id).await? else {
            error!(
                poll_id = poll.id,
                event_id = poll.target_event_id,
                "Target event for poll no longer exists"
            );
            return poll_repo.mark_failed(poll.id).await;
        };

        let attribution =
            extract_attribution(thread.opening_body.as_deref(), thread.owner_name.as_deref());
        let assigned = event_repo
            .assign(AssignEventParams {
                event_id: event.id,
                name: thread.name.clone(),
                creator_id: 0,
                creator_name: attribution,
            })
            .await?;
        if !assigned {
            // The write only fills a still-open slot. Either someone assigned
            // the slot by hand while the vote ran, or the row is gone.
            return match event_repo.get_by_id(event.id).await? {
                Some(current) if !current.is_unassigned() => {
                    info!(
                        poll_id = poll.id,
                        event_id = current.id,
                        "Event already assigned; completing poll without applying the winner"
                    );
                    poll_repo.mark_completed(poll.id, winning_thread_id).await?;
                    if let Some(channel) = log_channel {
                        let content = format!(
                            "Poll #{} ended with **{}** as the winner, but **{}** was \
                             already scheduled for {} by hand. The schedule was left \
                             as is.",
                            poll.id,
                            thread.name,
                            current.name,
                            format_event_date(current.date)
                        );
                        self.notifier.announce(channel, &content).await;
                    }
                    Ok(())
                }
                _ => {
                    error!(
                        poll_id = poll.id,
                        event_id = event.id,
                        "Failed to write winner into the event slot"
                    );
                    poll_repo.mark_failed(poll.id).await?;
                    self.notify_creator(
                        creator_id,
                        log_channel,
                        &format!(
                            "Your mission poll #{} ended with **{}** as the winner, \
                             but scheduling it failed.",
                            poll.id, thread.name
                        ),
                    )
                    .await;
                    Ok(())
                }
            };
        }
        poll_repo.mark_completed(poll.id, winning_thread_id).await?;

        info!(
            poll_id = poll.id,
            event_id = event.id,
            winning_thread_id,
            mission = %thread.name,
            "Poll resolved and winner scheduled"
        );

        self.cleanup_messages(poll, channel_id, message_id).await;
        self.announce_winner(poll, guild_id, &thread.name, event.date, thread.owner_id)
            .await;
        self.notify_creator(
            creator_id,
            log_channel,
            &format!(
                "Your mission poll #{} has ended: **{}** won and has been scheduled \
                 for {}.",
                poll.id,
                thread.name,
                format_event_date(event.date)
            ),
        )
        .await;
        if !self.display.refresh(guild_id).await {
            warn!(guild_id, "Failed to refresh the schedule display");
        }

        Ok(())
    }

    /// Removes the poll message and its links companion. Best effort; a
    /// failure leaves a stale message behind but never blocks resolution.
    async fn cleanup_messages(&self, poll: &MissionPoll, channel_id: u64, message_id: u64) {
        if let Err(e) = self.vote.delete(channel_id, message_id).await {
            warn!(poll_id = poll.id, "Failed to delete poll message: {}", e);
        }
        let links_id = poll
            .links_message_id
            .as_ref()
            .and_then(|id| id.parse::<u64>().ok());
        if let Some(links_id) = links_id {
            if let Err(e) = self.vote.delete(channel_id, links_id).await {
                warn!(poll_id = poll.id, "Failed to delete links message: {}", e);
            }
        }
    }

    /// Announces the winner in the guild's schedule channel, asking the
    /// mission author to fill in the event details.
    async fn announce_winner(
        &self,
        poll: &MissionPoll,
        guild_id: u64,
        mission_name: &str,
        event_date: chrono::NaiveDate,
        owner_id: Option<u64>,
    ) {
        let Some(channel) = self.schedule_channel_id(guild_id).await else {
            return;
        };
        let mention = owner_id
            .map(|id| format!(" <@{}>, please update the event details.", id))
            .unwrap_or_default();
        let content = format!(
            "✅ Poll ended: **{}** has been scheduled for **{}**.{}",
            mission_name,
            format_event_date(event_date),
            mention
        );
        if !self.notifier.announce(channel, &content).await {
            warn!(poll_id = poll.id, "Failed to announce the poll winner");
        }
    }

    /// DMs the poll creator with a fallback to the log channel. No-op when
    /// the stored creator id does not parse.
    async fn notify_creator(
        &self,
        creator_id: Option<u64>,
        log_channel: Option<u64>,
        content: &str,
    ) {
        if let Some(creator_id) = creator_id {
            self.notifier
                .dm_or_fallback(creator_id, content, log_channel)
                .await;
        }
    }
}
