//! Production provider backed by the Discord HTTP API.
//!
//! One struct implements all four provider traits; the bot and the
//! scheduler share a single instance behind an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Days, Utc};
use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        Channel, ChannelId, CreateEmbed, CreateMessage, CreatePoll, CreatePollAnswer, EditMessage,
        GuildChannel, MessageId, UserId,
    },
    async_trait,
    http::{Http, HttpError, StatusCode},
};
use tracing::warn;

use crate::data::schedule_config::ScheduleConfigRepository;
use crate::model::candidate::ForumThread;
use crate::model::schedule_config::UpsertScheduleConfigParams;
use crate::service::answer_format::format_event_date;
use crate::service::provider::{
    ContentSource, Notifier, ProviderError, ScheduleDisplay, VoteSurface,
};

/// How long to wait for a thread starter message before giving up on it.
const STARTER_MESSAGE_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// How many days of events the schedule display shows.
const SCHEDULE_DISPLAY_DAYS: u64 = 28;

/// Discord-backed implementation of the provider traits.
pub struct DiscordProvider {
    http: Arc<Http>,
    db: DatabaseConnection,
}

impl DiscordProvider {
    pub fn new(http: Arc<Http>, db: DatabaseConnection) -> Self {
        Self { http, db }
    }

    /// Fetches a channel expecting it to live in a guild.
    async fn guild_channel(&self, channel_id: u64) -> Result<GuildChannel, ProviderError> {
        match self.http.get_channel(ChannelId::new(channel_id)).await? {
            Channel::Guild(channel) => Ok(channel),
            _ => Err(ProviderError::Other(format!(
                "channel {} is not a guild channel",
                channel_id
            ))),
        }
    }

    /// Maps a thread's applied tag ids to names via the parent forum's tags.
    fn thread_labels(thread: &GuildChannel, tag_names: &HashMap<u64, String>) -> Vec<String> {
        thread
            .applied_tags
            .iter()
            .filter_map(|tag_id| tag_names.get(&tag_id.get()).cloned())
            .collect()
    }

    /// Builds the candidate model from a raw thread channel. Listing skips
    /// the starter message and owner lookup; those are only fetched for a
    /// single thread at resolution time.
    fn thread_summary(thread: &GuildChannel, tag_names: &HashMap<u64, String>) -> ForumThread {
        ForumThread {
            id: thread.id.get(),
            name: thread.name.clone(),
            labels: Self::thread_labels(thread, tag_names),
            owner_id: thread.owner_id.map(|id| id.get()),
            owner_name: None,
            opening_body: None,
        }
    }
}

/// Whether a serenity error is a plain 404 from the API.
fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code == StatusCode::NOT_FOUND
    )
}

#[async_trait]
impl VoteSurface for DiscordProvider {
    async fn render(
        &self,
        channel_id: u64,
        question: &str,
        options: &[String],
        duration_hours: u32,
    ) -> Result<u64, ProviderError> {
        let answers: Vec<CreatePollAnswer> = options
            .iter()
            .map(|text| CreatePollAnswer::new().text(text))
            .collect();
        let poll = CreatePoll::new()
            .question(question)
            .answers(answers)
            .duration(StdDuration::from_secs(u64::from(duration_hours) * 3600));

        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().poll(poll))
            .await?;
        Ok(message.id.get())
    }

    async fn read_tallies(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<Vec<u64>>, ProviderError> {
        let message = match self
            .http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await
        {
            Ok(message) => message,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let Some(poll) = message.poll else {
            return Ok(None);
        };

        let counts: HashMap<u64, u64> = poll
            .results
            .map(|results| {
                results
                    .answer_counts
                    .iter()
                    .map(|entry| (entry.id.get(), entry.count))
                    .collect()
            })
            .unwrap_or_default();

        let tallies = poll
            .answers
            .iter()
            .map(|answer| counts.get(&answer.answer_id.get()).copied().unwrap_or(0))
            .collect();
        Ok(Some(tallies))
    }

    async fn post_listing(
        &self,
        channel_id: u64,
        title: &str,
        lines: &[String],
    ) -> Result<u64, ProviderError> {
        let embed = CreateEmbed::new()
            .title(title)
            .description(lines.join("\n"))
            .color(0x3498db);
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;
        Ok(message.id.get())
    }

    async fn delete(&self, channel_id: u64, message_id: u64) -> Result<(), ProviderError> {
        match self
            .http
            .delete_message(ChannelId::new(channel_id), MessageId::new(message_id), None)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ContentSource for DiscordProvider {
    async fn list_threads(&self, channel_id: u64) -> Result<Vec<ForumThread>, ProviderError> {
        let forum = self.guild_channel(channel_id).await?;
        let tag_names: HashMap<u64, String> = forum
            .available_tags
            .iter()
            .map(|tag| (tag.id.get(), tag.name.clone()))
            .collect();

        let mut threads: Vec<ForumThread> = Vec::new();
        let mut seen = std::collections::HashSet::new();

        let active = forum.guild_id.get_active_threads(&self.http).await?;
        for thread in active
            .threads
            .iter()
            .filter(|t| t.parent_id == Some(forum.id))
        {
            if seen.insert(thread.id.get()) {
                threads.push(Self::thread_summary(thread, &tag_names));
            }
        }

        // Archived threads round out the candidate pool. A failure here
        // only narrows the pool, so it is logged and skipped.
        match self
            .http
            .get_channel_archived_public_threads(forum.id, None, Some(100))
            .await
        {
            Ok(archived) => {
                for thread in &archived.threads {
                    if seen.insert(thread.id.get()) {
                        threads.push(Self::thread_summary(thread, &tag_names));
                    }
                }
            }
            Err(e) => {
                warn!(channel_id, "Failed to fetch archived threads: {}", e);
            }
        }

        Ok(threads)
    }

    async fn get_thread(&self, thread_id: u64) -> Result<Option<ForumThread>, ProviderError> {
        let thread = match self.http.get_channel(ChannelId::new(thread_id)).await {
            Ok(Channel::Guild(thread)) => thread,
            Ok(_) => return Ok(None),
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let tag_names: HashMap<u64, String> = match thread.parent_id {
            Some(parent_id) => self
                .guild_channel(parent_id.get())
                .await
                .map(|forum| {
                    forum
                        .available_tags
                        .iter()
                        .map(|tag| (tag.id.get(), tag.name.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            None => HashMap::new(),
        };

        let owner_name = match thread.owner_id {
            Some(owner_id) => match thread.guild_id.member(&self.http, owner_id).await {
                Ok(member) => Some(member.display_name().to_string()),
                Err(e) => {
                    warn!(thread_id, "Failed to resolve thread owner: {}", e);
                    None
                }
            },
            None => None,
        };

        // A forum thread's starter message shares the thread's id. Fetching
        // it can stall on large threads, so the wait is bounded.
        let opening_body = match tokio::time::timeout(
            STARTER_MESSAGE_TIMEOUT,
            self.http
                .get_message(ChannelId::new(thread_id), MessageId::new(thread_id)),
        )
        .await
        {
            Ok(Ok(message)) => Some(message.content),
            Ok(Err(e)) => {
                if !is_not_found(&e) {
                    warn!(thread_id, "Failed to fetch starter message: {}", e);
                }
                None
            }
            Err(_) => {
                warn!(thread_id, "Timed out fetching starter message");
                None
            }
        };

        Ok(Some(ForumThread {
            id: thread.id.get(),
            name: thread.name.clone(),
            labels: Self::thread_labels(&thread, &tag_names),
            owner_id: thread.owner_id.map(|id| id.get()),
            owner_name,
            opening_body,
        }))
    }

    async fn available_tags(&self, channel_id: u64) -> Result<Vec<String>, ProviderError> {
        let forum = self.guild_channel(channel_id).await?;
        Ok(forum
            .available_tags
            .iter()
            .map(|tag| tag.name.clone())
            .collect())
    }
}

#[async_trait]
impl Notifier for DiscordProvider {
    async fn dm_or_fallback(
        &self,
        user_id: u64,
        content: &str,
        fallback_channel_id: Option<u64>,
    ) -> bool {
        let dm_result = async {
            let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
            channel
                .id
                .send_message(&self.http, CreateMessage::new().content(content))
                .await
        }
        .await;

        match dm_result {
            Ok(_) => true,
            Err(e) => {
                warn!(user_id, "Failed to DM user: {}", e);
                let Some(fallback) = fallback_channel_id else {
                    return false;
                };
                let fallback_content = format!("<@{}> {}", user_id, content);
                self.announce(fallback, &fallback_content).await
            }
        }
    }

    async fn announce(&self, channel_id: u64, content: &str) -> bool {
        match ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(channel_id, "Failed to post announcement: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl ScheduleDisplay for DiscordProvider {
    async fn refresh(&self, guild_id: u64) -> bool {
        let config = match ScheduleConfigRepository::new(&self.db).get(guild_id).await {
            Ok(Some(config)) => config,
            Ok(None) => return false,
            Err(e) => {
                warn!(guild_id, "Failed to load schedule config: {}", e);
                return false;
            }
        };
        let Some(channel_id) = config
            .schedule_channel_id
            .and_then(|id| id.parse::<u64>().ok())
        else {
            return false;
        };
        let message_id = config
            .schedule_message_id
            .and_then(|id| id.parse::<u64>().ok());

        let today = Utc::now().date_naive();
        let horizon = today + Days::new(SCHEDULE_DISPLAY_DAYS);
        let events = match crate::data::event::EventRepository::new(&self.db)
            .get_in_range(guild_id, today, horizon)
            .await
        {
            Ok(events) => events,
            Err(e) => {
                warn!(guild_id, "Failed to load events for schedule display: {}", e);
                return false;
            }
        };

        let lines: Vec<String> = events
            .iter()
            .map(|event| {
                if event.is_unassigned() {
                    format!(
                        "**{}** - {}: *open slot*",
                        format_event_date(event.date),
                        event.event_type
                    )
                } else {
                    format!(
                        "**{}** - {}: {} (by {})",
                        format_event_date(event.date),
                        event.event_type,
                        event.name,
                        event.creator_name
                    )
                }
            })
            .collect();
        let description = if lines.is_empty() {
            "No upcoming events.".to_string()
        } else {
            lines.join("\n")
        };
        let embed = CreateEmbed::new()
            .title("Upcoming Schedule")
            .description(description)
            .color(0x2ecc71);

        if let Some(message_id) = message_id {
            match self
                .http
                .edit_message(
                    ChannelId::new(channel_id),
                    MessageId::new(message_id),
                    &EditMessage::new().embed(embed.clone()),
                    vec![],
                )
                .await
            {
                Ok(_) => return true,
                Err(e) if is_not_found(&e) => {
                    // The display message was deleted; post a fresh one.
                }
                Err(e) => {
                    warn!(guild_id, "Failed to edit schedule display message: {}", e);
                    return false;
                }
            }
        }

        self.post_schedule_message(guild_id, channel_id, embed).await
    }
}

impl DiscordProvider {
    /// Posts a new schedule display message and records its id so later
    /// refreshes edit in place.
    async fn post_schedule_message(
        &self,
        guild_id: u64,
        channel_id: u64,
        embed: CreateEmbed,
    ) -> bool {
        let message = match ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            Ok(message) => message,
            Err(e) => {
                warn!(guild_id, "Failed to post schedule display message: {}", e);
                return false;
            }
        };

        let params = UpsertScheduleConfigParams {
            guild_id,
            schedule_message_id: Some(message.id.get()),
            ..Default::default()
        };
        if let Err(e) = ScheduleConfigRepository::new(&self.db).upsert(params).await {
            warn!(guild_id, "Failed to store schedule display message id: {}", e);
            return false;
        }
        true
    }
}
