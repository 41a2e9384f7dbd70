//! Pattern constants used by the node classifier and scorer.
//!
//! These are matched case-insensitively against concatenated `class`+`id`
//! text. Kept as crate constants rather than a configurable knob: unlike the
//! teacher crate's `ScorerOptions`, which threads borrowed `&Regex` through
//! every call, these four patterns are fixed by the heuristic itself.

use regex::Regex;

const UNLIKELY_PATTERN: &str = "combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|tweet|twitter";
const MAYBE_PATTERN: &str = "and|article|body|column|main|shadow";
const POSITIVE_PATTERN: &str =
    "article|body|content|entry|hentry|main|page|pagination|post|text|blog|story";
const NEGATIVE_PATTERN: &str = "combx|comment|com-|contact|foot|footer|footnote|masthead|media|meta|outbrain|promo|related|scroll|shoutbox|sidebar|sponsor|shopping|tags|tool|widget";

lazy_static! {
    pub static ref UNLIKELY: Regex = Regex::new(&format!("(?i){UNLIKELY_PATTERN}")).unwrap();
    pub static ref MAYBE: Regex = Regex::new(&format!("(?i){MAYBE_PATTERN}")).unwrap();
    pub static ref POSITIVE: Regex = Regex::new(&format!("(?i){POSITIVE_PATTERN}")).unwrap();
    pub static ref NEGATIVE: Regex = Regex::new(&format!("(?i){NEGATIVE_PATTERN}")).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_matches_sidebar() {
        assert!(UNLIKELY.is_match("Sidebar-Widget"));
    }

    #[test]
    fn maybe_rescues_article() {
        assert!(UNLIKELY.is_match("footer-article"));
        assert!(MAYBE.is_match("footer-article"));
    }

    #[test]
    fn positive_matches_content() {
        assert!(POSITIVE.is_match("main-content"));
    }

    #[test]
    fn negative_matches_widget() {
        assert!(NEGATIVE.is_match("sidebar-widget"));
    }
}
