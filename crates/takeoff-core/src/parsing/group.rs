use regex::Regex;
use std::sync::LazyLock;

/// Organization name used when a document carries no recognizable heading.
pub const DEFAULT_ORGANIZATION: &str = "Byrne Construction Services";

/// Organization header followed, possibly several lines later, by the
/// estimate code ("EST" + digits).
static GROUP_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)BYRNE CONSTRUCTION SERVICES.*?EST\d+").expect("valid group heading pattern")
});

/// Derive the group label for every item in a document.
///
/// Uses the heading span with whitespace collapsed when present, otherwise
/// falls back to `"{DEFAULT_ORGANIZATION} - {source}"`.
pub fn identify_group(text: &str, source: &str) -> String {
    match GROUP_HEADING.find(text) {
        Some(m) => normalize_ws(m.as_str()),
        None => fallback_group(source),
    }
}

pub fn fallback_group(source: &str) -> String {
    format!("{DEFAULT_ORGANIZATION} - {source}")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
