//! Content preparation: markup stripping and truncation.
//!
//! Raw post bodies arrive with HTML and shortcode syntax. The sanitizer
//! reduces them to plain text with line breaks preserved, then trims the
//! result to the configured character budget at a sentence or word
//! boundary so the provider never receives a mid-word cut.

use once_cell::sync::Lazy;
use regex::Regex;

pub const ELLIPSIS: &str = "...";

static SHORTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[/?[a-zA-Z][a-zA-Z0-9_-]*[^\]]*\]").unwrap());
static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>|</h[1-6]\s*>|</blockquote\s*>|</tr\s*>")
        .unwrap()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip markup and truncate to `max_chars` characters. The cap is
/// clamped to a sane range by the caller's settings record; values the
/// record could not vouch for fall back there, so this function trusts
/// its input. Always produces output.
pub fn sanitize_content(raw: &str, max_chars: u32) -> String {
    let text = strip_markup(raw);
    truncate_at_boundary(&text, max_chars as usize)
}

/// Remove shortcode tokens and HTML tags, keeping the enclosed text and
/// turning block-level markup into line breaks.
pub fn strip_markup(raw: &str) -> String {
    let text = SHORTCODE.replace_all(raw, "");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Cut `text` to at most `cap` characters. When a cut is needed, prefer
/// the last sentence terminator inside the trailing 20% of the window,
/// then the last whitespace in that region, then a hard cut at the cap.
/// Truncated output always ends with the ellipsis marker.
fn truncate_at_boundary(text: &str, cap: usize) -> String {
    let mut window_end = text.len();
    let mut exceeded = false;
    // (chars kept, byte index to cut at)
    let mut last_sentence: Option<(usize, usize)> = None;
    let mut last_space: Option<(usize, usize)> = None;

    for (pos, (byte_idx, ch)) in text.char_indices().enumerate() {
        if pos == cap {
            window_end = byte_idx;
            exceeded = true;
            break;
        }
        match ch {
            '.' | '!' | '?' => last_sentence = Some((pos + 1, byte_idx + ch.len_utf8())),
            c if c.is_whitespace() => last_space = Some((pos, byte_idx)),
            _ => {}
        }
    }

    if !exceeded {
        return text.to_string();
    }

    let within_tail = |chars_kept: usize| chars_kept * 5 > cap * 4;

    let cut = match last_sentence {
        Some((chars_kept, byte_end)) if within_tail(chars_kept) => byte_end,
        _ => match last_space {
            Some((chars_kept, byte_start)) if within_tail(chars_kept) => byte_start,
            _ => window_end,
        },
    };

    let mut out = text[..cut].trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_line_breaks() {
        let raw = "<p>First paragraph.</p><p>Second <strong>bold</strong> paragraph.</p>";
        let text = strip_markup(raw);
        assert_eq!(text, "First paragraph.\nSecond bold paragraph.");
    }

    #[test]
    fn strips_shortcodes_but_keeps_enclosed_text() {
        let raw = "[gallery ids=\"1,2\"]Intro [caption width=\"300\"]A photo[/caption] outro";
        let text = strip_markup(raw);
        assert_eq!(text, "Intro A photo outro");
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(strip_markup("Tom &amp; Jerry &gt; cats"), "Tom & Jerry > cats");
    }

    #[test]
    fn short_content_passes_through_untouched() {
        let text = "Short body with no markup.";
        assert_eq!(sanitize_content(text, 4000), text);
    }

    #[test]
    fn truncates_at_sentence_boundary_in_tail_window() {
        // Sentence terminator lands inside the trailing 20% of the window.
        let mut body = "word ".repeat(40);
        body.push_str("End of thought. And then a trailing fragment that keeps going");
        let cap = 220;
        let out = sanitize_content(&body, cap);
        assert!(out.ends_with(&format!("thought.{ELLIPSIS}")), "got: {out}");
        assert!(out.chars().count() <= cap as usize + ELLIPSIS.len());
    }

    #[test]
    fn truncates_at_word_boundary_without_sentence_terminator() {
        let body = "alpha beta gamma delta ".repeat(50);
        let cap = 200;
        let out = sanitize_content(&body, cap);
        assert!(out.ends_with(ELLIPSIS));
        // The character before the marker must not split a word.
        let trimmed = out.trim_end_matches(ELLIPSIS);
        assert!(["alpha", "beta", "gamma", "delta"]
            .iter()
            .any(|w| trimmed.ends_with(w)));
        assert!(out.chars().count() <= cap as usize + ELLIPSIS.len());
    }

    #[test]
    fn hard_truncates_when_no_boundary_in_tail_window() {
        let body = "x".repeat(500);
        let out = sanitize_content(&body, 120);
        assert_eq!(out.chars().count(), 120 + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn early_boundary_outside_tail_window_is_ignored() {
        // Only whitespace near the start; the 80% threshold rejects it.
        let body = format!("ab cd {}", "x".repeat(500));
        let out = sanitize_content(&body, 100);
        assert_eq!(out.chars().count(), 100 + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn multibyte_content_cuts_on_character_boundaries() {
        let body = "дом ".repeat(100);
        let out = sanitize_content(&body, 150);
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.chars().count() <= 150 + ELLIPSIS.len());
    }

    #[test]
    fn output_length_never_exceeds_cap_plus_marker() {
        for cap in [100u32, 150, 1000, 4000] {
            let body = "Sentence one. Sentence two! Sentence three? ".repeat(200);
            let out = sanitize_content(&body, cap);
            assert!(
                out.chars().count() <= cap as usize + ELLIPSIS.len(),
                "cap {cap} violated: {} chars",
                out.chars().count()
            );
        }
    }
}
