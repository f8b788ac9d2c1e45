//! Preview text around the first match of a query.
//!
//! All offsets are in characters, not bytes, so multi-byte text is never
//! split inside a code point.

pub const DEFAULT_MAX_LEN: usize = 150;

/// Characters of context kept on each side of the match.
pub const CONTEXT_CHARS: usize = 50;

const ELLIPSIS: char = '\u{2026}';

/// Extract a preview of `text` around the first case-insensitive occurrence
/// of `query`.
///
/// When the query is found, the window spans [`CONTEXT_CHARS`] before and
/// after the match and is marked with `…` on each side that was cut. When it
/// is not found, the text is truncated to `max_len` characters.
pub fn snippet(text: &str, query: &str, max_len: usize) -> String {
    if text.is_empty() || query.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let Some((match_start, match_end)) = find_ignore_case(&chars, query) else {
        if chars.len() > max_len {
            let mut out: String = chars[..max_len].iter().collect();
            out.push(ELLIPSIS);
            return out;
        }
        return text.to_string();
    };

    let start = match_start.saturating_sub(CONTEXT_CHARS);
    let end = (match_end + CONTEXT_CHARS).min(chars.len());

    let mut out = String::with_capacity(end - start + 2);
    if start > 0 {
        out.push(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push(ELLIPSIS);
    }
    out
}

/// Locate `needle` in `haystack` ignoring case. Returns the matched span as
/// character indices into `haystack`.
///
/// Lowercasing can change the number of characters (e.g. `İ`), so each
/// folded character remembers which original character produced it.
fn find_ignore_case(haystack: &[char], needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    let mut folded = Vec::with_capacity(haystack.len());
    let mut origin = Vec::with_capacity(haystack.len());
    for (i, c) in haystack.iter().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(i);
        }
    }

    let pos = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let start = origin[pos];
    let end = origin[pos + needle.len() - 1] + 1;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_returned_whole() {
        assert_eq!(snippet("Release plan", "plan", DEFAULT_MAX_LEN), "Release plan");
    }

    #[test]
    fn empty_inputs_give_empty_snippet() {
        assert_eq!(snippet("", "plan", DEFAULT_MAX_LEN), "");
        assert_eq!(snippet("Release plan", "", DEFAULT_MAX_LEN), "");
    }

    #[test]
    fn unmatched_text_is_truncated() {
        let text = "a".repeat(200);
        let out = snippet(&text, "zzz", DEFAULT_MAX_LEN);
        assert_eq!(out.chars().count(), 151);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn unmatched_short_text_is_not_marked() {
        assert_eq!(snippet("nothing here", "zzz", DEFAULT_MAX_LEN), "nothing here");
    }

    #[test]
    fn window_in_the_middle_is_marked_on_both_sides() {
        let text = format!("{}release{}", "x".repeat(100), "y".repeat(93));
        assert_eq!(text.chars().count(), 200);
        let out = snippet(&text, "release", DEFAULT_MAX_LEN);
        assert!(out.starts_with('…'));
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= DEFAULT_MAX_LEN + 2);
        assert_eq!(out.chars().count(), 50 + 7 + 50 + 2);
        assert!(out.contains("release"));
    }

    #[test]
    fn window_at_start_has_no_leading_marker() {
        let text = format!("release{}", "y".repeat(100));
        let out = snippet(&text, "RELEASE", DEFAULT_MAX_LEN);
        assert!(out.starts_with("release"));
        assert!(out.ends_with('…'));
    }

    #[test]
    fn window_at_end_has_no_trailing_marker() {
        let text = format!("{}release", "x".repeat(100));
        let out = snippet(&text, "release", DEFAULT_MAX_LEN);
        assert!(out.starts_with('…'));
        assert!(out.ends_with("release"));
        assert_eq!(out.chars().count(), 1 + 50 + 7);
    }

    #[test]
    fn first_occurrence_wins() {
        let text = format!("plan{}plan", "-".repeat(120));
        let out = snippet(&text, "plan", DEFAULT_MAX_LEN);
        assert!(out.starts_with("plan"));
        assert_eq!(out.chars().count(), 4 + 50 + 1);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = format!("{}Größe{}", "ü".repeat(80), "é".repeat(80));
        let out = snippet(&text, "größe", DEFAULT_MAX_LEN);
        assert!(out.contains("Größe"));
        assert_eq!(out.chars().count(), 1 + 50 + 5 + 50 + 1);
    }
}
