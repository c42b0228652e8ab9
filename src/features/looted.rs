//! "Last looted" timestamp editing for lootable area posts

use regex::Regex;
use std::sync::OnceLock;

const PLACEHOLDER: &str = "Last looted: N/A";

fn timestamp_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"Last looted: <t:\d+(?::[tTdDfFR])?>").ok())
        .as_ref()
}

/// Discord timestamp token rendered in the viewer's locale
pub fn timestamp_token(unix_seconds: i64) -> String {
    format!("<t:{unix_seconds}:F>")
}

/// Replace the post's "Last looted" value with `unix_seconds`
///
/// An existing timestamp token is replaced first, then the `N/A`
/// placeholder; a post with neither gets the line appended. Nothing else in
/// the content changes.
pub fn mark_looted(content: &str, unix_seconds: i64) -> String {
    let line = format!("Last looted: {}", timestamp_token(unix_seconds));

    if let Some(pattern) = timestamp_pattern().filter(|pattern| pattern.is_match(content)) {
        return pattern.replace(content, line.as_str()).into_owned();
    }
    if content.contains(PLACEHOLDER) {
        return content.replacen(PLACEHOLDER, &line, 1);
    }
    if content.is_empty() {
        line
    } else {
        format!("{}\n{line}", content.trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_replaced() {
        let content = "**Area 42**\nLast looted: N/A\n[Area 42 map url (pzfans.com):] https://x/42\n";
        let updated = mark_looted(content, 1_700_000_000);
        assert_eq!(
            updated,
            "**Area 42**\nLast looted: <t:1700000000:F>\n[Area 42 map url (pzfans.com):] https://x/42\n"
        );
        assert!(!updated.contains("N/A"));
    }

    #[test]
    fn test_existing_timestamp_replaced() {
        let content = "Last looted: <t:1600000000:F>\nmore";
        assert_eq!(mark_looted(content, 1_700_000_000), "Last looted: <t:1700000000:F>\nmore");
        let bare = "Last looted: <t:1600000000>";
        assert_eq!(mark_looted(bare, 5), "Last looted: <t:5:F>");
    }

    #[test]
    fn test_marking_twice_is_stable() {
        let once = mark_looted("Last looted: N/A", 10);
        let twice = mark_looted(&once, 10);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_line_appended() {
        assert_eq!(mark_looted("**Area**\n", 3), "**Area**\nLast looted: <t:3:F>");
        assert_eq!(mark_looted("", 3), "Last looted: <t:3:F>");
    }
}
