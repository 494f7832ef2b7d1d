//! Candidate discovery and filtering for poll creation.
//!
//! Produces the eligible candidate set for a poll: filter the forum threads
//! by framework and composition tag, drop recent winners inside the two-week
//! deduplication window, and randomly sample down to the requested option
//! count. All functions here are pure over already-fetched data; the network
//! side lives behind `ContentSource`.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::candidate::ForumThread;
use crate::model::mission_poll::RecentWinner;
use crate::service::poll::PollError;
use crate::service::tag_catalog::FRAMEWORK_TAG_PATTERN;

/// Number of days a poll winner stays excluded, counted from its target
/// event's date.
pub const DEDUP_WINDOW_DAYS: i64 = 14;

/// Returns only the composition (non-framework) tags of a thread.
pub fn composition_tags_of(thread: &ForumThread) -> Vec<String> {
    thread
        .labels
        .iter()
        .filter(|label| !FRAMEWORK_TAG_PATTERN.is_match(label))
        .cloned()
        .collect()
}

/// Filters threads by framework tag and, unless it is the "All" sentinel,
/// composition tag. Matching is exact and case-insensitive; input order is
/// preserved.
pub fn filter_by_tags(
    threads: &[ForumThread],
    framework: &str,
    composition: &str,
) -> Vec<ForumThread> {
    let framework_lower = framework.to_lowercase();
    let composition_lower = composition.to_lowercase();
    let any_composition = composition_lower == "all";

    threads
        .iter()
        .filter(|thread| {
            let labels_lower: Vec<String> =
                thread.labels.iter().map(|l| l.to_lowercase()).collect();
            if !labels_lower.iter().any(|l| *l == framework_lower) {
                return false;
            }
            any_composition || labels_lower.iter().any(|l| *l == composition_lower)
        })
        .cloned()
        .collect()
}

/// Thread ids excluded by the deduplication window.
///
/// A winner is excluded while `today - event_date < 14 days`. The window is
/// keyed to the target event's date, so a winner scheduled into a far-future
/// event stays excluded until that date has passed.
pub fn excluded_thread_ids(winners: &[RecentWinner], today: NaiveDate) -> HashSet<u64> {
    winners
        .iter()
        .filter(|w| (today - w.event_date).num_days() < DEDUP_WINDOW_DAYS)
        .map(|w| w.winning_thread_id)
        .collect()
}

/// Splits filtered candidates into (excluded, remaining) by the dedup set.
/// Both halves are surfaced so the requester can be told what was dropped.
pub fn partition_excluded(
    threads: Vec<ForumThread>,
    excluded_ids: &HashSet<u64>,
) -> (Vec<ForumThread>, Vec<ForumThread>) {
    threads
        .into_iter()
        .partition(|t| excluded_ids.contains(&t.id))
}

/// Result of sampling candidates down to the requested option count.
#[derive(Debug, Clone)]
pub struct SampledOptions {
    /// Candidates that will become poll options, in final answer order.
    pub selected: Vec<ForumThread>,
    /// Candidates dropped by random selection, reported to the requester.
    pub excluded_by_random: Vec<ForumThread>,
}

/// Applies the selection-size policy to the post-dedup candidate set.
///
/// Zero candidates or a single candidate are hard failures; more candidates
/// than requested are shuffled and sampled down to exactly `requested`, with
/// the remainder reported rather than silently dropped.
pub fn sample_options(
    mut remaining: Vec<ForumThread>,
    requested: usize,
    rng: &mut impl Rng,
) -> Result<SampledOptions, PollError> {
    match remaining.len() {
        0 => return Err(PollError::NoCandidates),
        1 => {
            return Err(PollError::NotEnoughCandidates {
                only: remaining.remove(0).name,
            })
        }
        _ => {}
    }

    if remaining.len() <= requested {
        return Ok(SampledOptions {
            selected: remaining,
            excluded_by_random: Vec::new(),
        });
    }

    remaining.shuffle(rng);
    let excluded_by_random = remaining.split_off(requested);
    Ok(SampledOptions {
        selected: remaining,
        excluded_by_random,
    })
}
