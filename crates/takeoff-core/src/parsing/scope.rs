use regex::Regex;
use std::sync::LazyLock;

/// Lowercase phrase that opens a block of priced subitems.
pub const SCOPE_SENTINEL: &str = "the scope of work includes:";

/// How many lines above a sentinel are searched for the item name.
pub const LOOKBACK_LINES: usize = 5;

/// Cleaned item names must be longer than this many characters.
const MIN_ITEM_NAME_LEN: usize = 3;

/// Lines containing any of these (case-insensitive) are letterhead or
/// boilerplate, never item names.
const SKIP_WORDS: &[&str] = &[
    "byrne construction",
    "proposal",
    "estimate",
    "project",
    "scope",
    "san antonio",
    "page",
    "date",
];

/// Price tokens and parenthetical asides stripped from item names.
static ITEM_NAME_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d,]+\.?\d*|\(.*?\)").expect("valid item name noise pattern"));

pub fn is_scope_sentinel(line: &str) -> bool {
    line.to_lowercase().contains(SCOPE_SENTINEL)
}

/// Find the item name owning the scope block that opens at `sentinel_index`.
///
/// Looks at up to `LOOKBACK_LINES` lines above the sentinel, nearest first,
/// and returns the first non-boilerplate line whose cleaned form is long
/// enough. Returns None if nothing in the window qualifies.
pub fn find_item_name(lines: &[&str], sentinel_index: usize) -> Option<String> {
    let end = sentinel_index.min(lines.len());
    let start = end.saturating_sub(LOOKBACK_LINES);

    for line in lines[start..end].iter().rev() {
        let candidate = line.trim();
        if candidate.is_empty() || is_boilerplate(candidate) {
            continue;
        }
        let name = clean_item_name(candidate);
        if name.chars().count() > MIN_ITEM_NAME_LEN {
            return Some(name);
        }
    }

    None
}

/// Remove price tokens and parenthetical asides, then trim.
pub fn clean_item_name(candidate: &str) -> String {
    ITEM_NAME_NOISE.replace_all(candidate, "").trim().to_string()
}

fn is_boilerplate(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    SKIP_WORDS.iter().any(|w| lower.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_case_insensitive() {
        assert!(is_scope_sentinel("THE SCOPE OF WORK INCLUDES:"));
        assert!(is_scope_sentinel("  Note: the scope of work includes: the following"));
        assert!(!is_scope_sentinel("The scope of work includes"));
    }

    #[test]
    fn test_clean_item_name() {
        assert_eq!(
            clean_item_name("Driveway Repair $1,200.00 (see note)"),
            "Driveway Repair"
        );
        assert_eq!(clean_item_name("Fence (north) and (east) $95"), "Fence  and");
    }

    #[test]
    fn test_nearest_line_is_item() {
        let lines = ["Driveway Repair $1,200.00 (see note)", "The scope of work includes:"];
        assert_eq!(find_item_name(&lines, 1).as_deref(), Some("Driveway Repair"));
    }

    #[test]
    fn test_boilerplate_line_is_skipped() {
        let lines = [
            "Roof Replacement",
            "Byrne Construction Services Proposal",
            "The scope of work includes:",
        ];
        assert_eq!(find_item_name(&lines, 2).as_deref(), Some("Roof Replacement"));
    }

    #[test]
    fn test_blank_and_short_lines_are_skipped() {
        let lines = ["Patio Cover", "", "$500.00", "ABC", "The scope of work includes:"];
        assert_eq!(find_item_name(&lines, 4).as_deref(), Some("Patio Cover"));
    }

    #[test]
    fn test_window_is_five_lines() {
        let lines = [
            "Too Far Away",
            "Page 1 of 3",
            "Date: 2024-03-01",
            "Project: Smith Residence",
            "San Antonio, TX",
            "Estimate #4411",
            "The scope of work includes:",
        ];
        assert_eq!(find_item_name(&lines, 6), None);
    }

    #[test]
    fn test_sentinel_on_first_line() {
        let lines = ["The scope of work includes:", "1 EA Thing $1.00"];
        assert_eq!(find_item_name(&lines, 0), None);
    }

    #[test]
    fn test_previous_sentinel_is_boilerplate() {
        let lines = [
            "Kitchen",
            "The scope of work includes:",
            "The scope of work includes:",
        ];
        assert_eq!(find_item_name(&lines, 2).as_deref(), Some("Kitchen"));
    }
}
