//! Mission author attribution heuristic.
//!
//! Briefing threads usually carry a "Created by: NAME" line in the opening
//! post, and the thread owner has a display name that often carries a rank
//! prefix ("Sgt. Smith"). The two sources are reconciled here so the
//! schedule shows a clean author name.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel used when no author source is available.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

static CREATED_BY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\*{0,2}(?:Created\s+by|Author|Mission\s+Maker)\*{0,2}\s*[:：]\s*\*{0,2}\s*(.+?)\s*$",
    )
    .expect("valid regex")
});

static RANK_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:Pvt|Pfc|LCpl|Cpl|Sgt|SSgt|GySgt|MSgt|1stSgt|MGySgt|2ndLt|1stLt|Capt|Maj|LtCol|Col|BGen|MajGen|LtGen|Gen|Rct|Pte|Tpr|Bdr|Spr|Sig|Cfn|Fus|Gds|Rfn)\.\s*",
    )
    .expect("valid regex")
});

/// Parses the author name from a thread's opening post, if present.
fn parse_post_author(opening_body: &str) -> Option<String> {
    let caps = CREATED_BY_PATTERN.captures(opening_body)?;
    let name = caps[1].trim_matches(|c| c == '*' || c == '_' || c == ' ');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Strips a leading military rank prefix for comparison purposes.
fn strip_rank_prefix(name: &str) -> String {
    RANK_PREFIX_PATTERN.replace(name, "").trim().to_string()
}

/// Extracts an attribution name from a thread's two author sources.
///
/// When both the parsed "Created by:" name and the owner display name exist
/// and match after rank-prefix stripping, the parsed form wins (it tends to
/// be cleaner). When they disagree, the owner name wins. A single available
/// source is used as-is; with neither, the "Unknown" sentinel is returned.
pub fn extract_attribution(opening_body: Option<&str>, owner_name: Option<&str>) -> String {
    let post_author = opening_body.and_then(parse_post_author);
    let owner_name = owner_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    match (post_author, owner_name) {
        (Some(post), Some(owner)) => {
            let post_stripped = strip_rank_prefix(&post);
            let owner_stripped = strip_rank_prefix(&owner);
            if post_stripped.eq_ignore_ascii_case(&owner_stripped) {
                post
            } else {
                owner
            }
        }
        (Some(post), None) => post,
        (None, Some(owner)) => owner,
        (None, None) => UNKNOWN_AUTHOR.to_string(),
    }
}
