//! Pure text formatting for poll answers and briefing links.
//!
//! Discord caps poll answer text at 55 characters, so answers are shortened
//! in stages: full text, then "Operation" abbreviated, then composition tags
//! abbreviated, then the mission name truncated with an ellipsis. These
//! functions perform no I/O; the same candidate ordering feeds both the poll
//! answers and the links embed.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Hard character budget imposed by Discord on poll answer text.
pub const MAX_POLL_ANSWER_LENGTH: usize = 55;

/// Maximum number of answers Discord allows on a single poll.
pub const MAX_POLL_OPTIONS: usize = 10;

/// Informal readability budget for link-entry display text.
const MAX_LINK_DISPLAY_LENGTH: usize = 60;

/// Composition tag abbreviations, applied only when the answer exceeds the
/// budget. Tags not listed fall back to their first four characters,
/// upper-cased.
const COMPOSITION_ABBREVIATIONS: &[(&str, &str)] = &[
    ("infantry", "INF"),
    ("motorised", "MOTO"),
    ("mechanized", "MECH"),
    ("air assault", "AIR"),
    ("amphibious", "AMPH"),
    ("armored", "ARM"),
    ("battlebus", "BB"),
    ("special forces", "SF"),
];

static OPERATION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOperation\b").expect("valid regex"));

static FRAMEWORK_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Framework\s+(\d+\.\d+)").expect("valid regex"));

/// Returns the ordinal string for an integer (1st, 2nd, 3rd, etc.).
pub fn ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// Formats a date as "Thursday 19th February".
pub fn format_event_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.format("%A"),
        ordinal(date.day()),
        date.format("%B")
    )
}

/// Converts "Framework 3.0" to "FW 3.0"; other strings pass through unchanged.
pub fn abbreviate_framework(tag_name: &str) -> String {
    match FRAMEWORK_VERSION.captures(tag_name) {
        Some(caps) => format!("FW {}", &caps[1]),
        None => tag_name.to_string(),
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn join_name_tags(name: &str, tag_str: &str) -> String {
    if tag_str.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, tag_str)
    }
}

fn bracketed(tags: &[String]) -> String {
    tags.iter().map(|t| format!("[{}]", t)).collect()
}

fn abbreviate_composition(tag: &str) -> String {
    let lower = tag.to_lowercase();
    for (full, short) in COMPOSITION_ABBREVIATIONS {
        if *full == lower {
            return (*short).to_string();
        }
    }
    truncate_chars(tag, 4).to_uppercase()
}

/// Formats a poll answer within the 55-character Discord limit.
///
/// Strategy, stopping at the first form that fits:
/// 1. Full name + full tag names
/// 2. "Operation" shortened to "Op" + full tag names
/// 3. "Op" + abbreviated tag names
/// 4. Truncated name ending in `…` + abbreviated tags, hard-cut to the limit
pub fn format_poll_answer(mission_name: &str, composition_tags: &[String]) -> String {
    let tag_str = bracketed(composition_tags);

    let answer = join_name_tags(mission_name, &tag_str);
    if char_len(&answer) <= MAX_POLL_ANSWER_LENGTH {
        return answer;
    }

    let short_name = OPERATION_WORD.replace_all(mission_name, "Op").into_owned();
    let answer = join_name_tags(&short_name, &tag_str);
    if char_len(&answer) <= MAX_POLL_ANSWER_LENGTH {
        return answer;
    }

    let abbrev_tag_str: String = composition_tags
        .iter()
        .map(|t| format!("[{}]", abbreviate_composition(t)))
        .collect();
    let answer = join_name_tags(&short_name, &abbrev_tag_str);
    if char_len(&answer) <= MAX_POLL_ANSWER_LENGTH {
        return answer;
    }

    // Space and ellipsis are budgeted alongside the abbreviated tag suffix;
    // the name always keeps at least a few characters.
    let mut max_name_len = MAX_POLL_ANSWER_LENGTH.saturating_sub(char_len(&abbrev_tag_str) + 2);
    if max_name_len < 5 {
        max_name_len = 5;
    }
    let truncated_name = format!("{}…", truncate_chars(&short_name, max_name_len - 1));
    let answer = join_name_tags(&truncated_name, &abbrev_tag_str);
    truncate_chars(&answer, MAX_POLL_ANSWER_LENGTH)
}

/// Formats a briefing-link entry for the links embed.
///
/// Uses the same candidate ordering as the poll answers but a softer
/// 60-character readability budget: "Op" shortening is always applied and
/// tags are abbreviated only when the display text runs over.
pub fn format_link_entry(mission_name: &str, composition_tags: &[String], thread_url: &str) -> String {
    let tag_str = bracketed(composition_tags);
    let short_name = OPERATION_WORD.replace_all(mission_name, "Op").into_owned();

    let mut display = join_name_tags(&short_name, &tag_str).trim().to_string();

    if char_len(&display) > MAX_LINK_DISPLAY_LENGTH {
        let abbrev_tag_str: String = composition_tags
            .iter()
            .map(|t| format!("[{}]", abbreviate_composition(t)))
            .collect();
        display = join_name_tags(&short_name, &abbrev_tag_str).trim().to_string();
    }

    format!("🔗 [{}]({})", display, thread_url)
}
