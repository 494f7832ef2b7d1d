//! Poll creation: validation, candidate selection and rendering.

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::data::event::EventRepository;
use crate::data::mission_poll::MissionPollRepository;
use crate::model::mission_poll::{CreatePollParams, MissionPoll, PollOption};
use crate::service::answer_format::{
    abbreviate_framework, format_event_date, format_link_entry, format_poll_answer,
    MAX_POLL_OPTIONS,
};
use crate::service::discovery::{
    composition_tags_of, excluded_thread_ids, filter_by_tags, partition_excluded, sample_options,
};
use crate::service::poll::{PollError, PollService, MIN_REQUESTED_OPTIONS, POLL_DURATIONS_HOURS};

/// A poll creation request, as collected from the slash command.
#[derive(Debug, Clone)]
pub struct CreatePollRequest {
    /// Discord guild id.
    pub guild_id: u64,
    /// Channel the poll message should be posted to.
    pub channel_id: u64,
    /// ID of the unassigned event the poll resolves into.
    pub target_event_id: i32,
    /// Framework tag to filter candidates by.
    pub framework: String,
    /// Composition tag to filter candidates by, or "All".
    pub composition: String,
    /// Vote duration in hours.
    pub duration_hours: u32,
    /// Number of options to put on the poll.
    pub requested_options: usize,
    /// Discord id of the requesting user.
    pub created_by: u64,
}

/// Outcome of a successful poll creation, reported back to the requester.
#[derive(Debug, Clone)]
pub struct CreatedPoll {
    /// The persisted poll.
    pub poll: MissionPoll,
    /// Label of the targeted event, e.g. "Saturday 14th March (Mission)".
    pub event_label: String,
    /// Number of options on the rendered poll.
    pub option_count: usize,
    /// Mission names dropped by the two-week deduplication window.
    pub dedup_removed: Vec<String>,
    /// Mission names dropped by random down-sampling.
    pub randomly_removed: Vec<String>,
}

impl PollService<'_> {
    /// Creates a mission poll for an unassigned event slot.
    ///
    /// Validation failures and empty candidate sets return before anything
    /// is posted or persisted. The Discord poll is rendered first and the
    /// row inserted after, so a crash between the two leaves an orphan
    /// message but never a poll row without a message.
    pub async fn create_poll(
        &self,
        request: CreatePollRequest,
        rng: &mut (impl Rng + Send),
    ) -> Result<CreatedPoll, PollError> {
        if !POLL_DURATIONS_HOURS.contains(&request.duration_hours) {
            return Err(PollError::InvalidDuration(request.duration_hours));
        }
        if request.requested_options < MIN_REQUESTED_OPTIONS
            || request.requested_options > MAX_POLL_OPTIONS
        {
            return Err(PollError::InvalidOptionCount(request.requested_options));
        }

        let event_repo = EventRepository::new(self.db);
        let poll_repo = MissionPollRepository::new(self.db);

        let event = event_repo
            .get_by_id(request.target_event_id)
            .await?
            .ok_or(PollError::EventNotFound)?;
        if !event.is_unassigned() {
            return Err(PollError::EventAlreadyScheduled {
                date: format_event_date(event.date),
                name: event.name,
            });
        }
        if poll_repo
            .get_active_for_event(event.id)
            .await?
            .is_some()
        {
            return Err(PollError::DuplicateActivePoll);
        }

        let briefing_channel = self
            .briefing_channel_id(request.guild_id)
            .await?
            .ok_or(PollError::NoSourceConfigured)?;
        self.tag_cache.ensure(self.source, briefing_channel).await;

        let threads = self.source.list_threads(briefing_channel).await?;
        let filtered = filter_by_tags(&threads, &request.framework, &request.composition);

        let winners = poll_repo.get_recent_winners(request.guild_id).await?;
        let excluded = excluded_thread_ids(&winners, Utc::now().date_naive());
        let (dedup_dropped, remaining) = partition_excluded(filtered, &excluded);

        let sampled = sample_options(remaining, request.requested_options, rng)?;

        let options: Vec<PollOption> = sampled
            .selected
            .into_iter()
            .map(|thread| {
                let composition_tags = composition_tags_of(&thread);
                let answer_text = format_poll_answer(&thread.name, &composition_tags);
                PollOption {
                    thread,
                    answer_text,
                    composition_tags,
                }
            })
            .collect();

        let event_label = format!("{} ({})", format_event_date(event.date), event.event_type);
        let framework_short = abbreviate_framework(&request.framework);
        let question = format!("{} - Mission Poll [{}]", event_label, framework_short);
        let answer_texts: Vec<String> = options.iter().map(|o| o.answer_text.clone()).collect();

        let poll_message_id = self
            .vote
            .render(
                request.channel_id,
                &question,
                &answer_texts,
                request.duration_hours,
            )
            .await
            .map_err(PollError::SurfaceRender)?;

        // The links listing is a nicety; a failure to post it does not abort
        // the poll, the poll just ships without clickable briefings.
        let links_message_id = self
            .post_links_listing(&request, &event_label, &framework_short, &options)
            .await;

        let mission_thread_ids: Vec<u64> = options.iter().map(|o| o.thread.id).collect();
        let params = CreatePollParams {
            guild_id: request.guild_id,
            poll_message_id,
            channel_id: request.channel_id,
            target_event_id: event.id,
            framework_filter: request.framework.clone(),
            composition_filter: request.composition.clone(),
            mission_thread_ids,
            poll_end_time: Utc::now() + Duration::hours(i64::from(request.duration_hours)),
            created_by: request.created_by,
            links_message_id,
        };

        let Some(poll) = poll_repo.insert_if_no_active(params).await? else {
            // Another request won the race between the check above and this
            // insert. Take the freshly rendered messages down again.
            if let Err(e) = self.vote.delete(request.channel_id, poll_message_id).await {
                warn!("Failed to remove duplicate poll message: {}", e);
            }
            if let Some(links_id) = links_message_id {
                if let Err(e) = self.vote.delete(request.channel_id, links_id).await {
                    warn!("Failed to remove duplicate links message: {}", e);
                }
            }
            return Err(PollError::DuplicateActivePoll);
        };

        info!(
            poll_id = poll.id,
            event_id = event.id,
            options = options.len(),
            "Created mission poll"
        );

        let created = CreatedPoll {
            option_count: options.len(),
            poll,
            event_label,
            dedup_removed: dedup_dropped.into_iter().map(|t| t.name).collect(),
            randomly_removed: sampled
                .excluded_by_random
                .into_iter()
                .map(|t| t.name)
                .collect(),
        };
        self.report_exclusions(&request, &created).await;

        Ok(created)
    }

    /// Posts the companion embed listing a clickable link per option.
    /// Returns the message id, or `None` when posting failed.
    async fn post_links_listing(
        &self,
        request: &CreatePollRequest,
        event_label: &str,
        framework_short: &str,
        options: &[PollOption],
    ) -> Option<u64> {
        let title = format!("{} - Mission Briefings [{}]", event_label, framework_short);
        let lines: Vec<String> = options
            .iter()
            .map(|o| {
                let url = format!(
                    "https://discord.com/channels/{}/{}",
                    request.guild_id, o.thread.id
                );
                format_link_entry(&o.thread.name, &o.composition_tags, &url)
            })
            .collect();

        match self
            .vote
            .post_listing(request.channel_id, &title, &lines)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to post briefing links listing: {}", e);
                None
            }
        }
    }

    /// Tells the requester which candidates were dropped and why. Delivery
    /// is best effort.
    async fn report_exclusions(&self, request: &CreatePollRequest, created: &CreatedPoll) {
        let log_channel = self.log_channel_id(request.guild_id).await;

        if !created.dedup_removed.is_empty() {
            let content = format!(
                "The following missions were excluded from the poll for {} because they \
                 were played within the last two weeks: {}",
                created.event_label,
                created.dedup_removed.join(", ")
            );
            self.notifier
                .dm_or_fallback(request.created_by, &content, log_channel)
                .await;
        }
        if !created.randomly_removed.is_empty() {
            let content = format!(
                "More missions matched than the poll could hold; {} were randomly left out \
                 of the poll for {}: {}",
                created.randomly_removed.len(),
                created.event_label,
                created.randomly_removed.join(", ")
            );
            self.notifier
                .dm_or_fallback(request.created_by, &content, log_channel)
                .await;
        }
    }
}
