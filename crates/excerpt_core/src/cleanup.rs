//! Post-processing of the raw provider reply.
//!
//! Models wrap excerpts in quotes, prepend labels like "Excerpt:", or
//! emphasize words even when told not to. The cleaner strips that
//! decoration and normalizes whitespace. It never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static SURROUNDING_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^["']|["']$"#).unwrap());
static LABEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(excerpt|summary|abstract|отрывок|резюме)[:\s\-]*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.*?)_").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw reply into plain excerpt text. Applied in order:
/// one layer of surrounding quotes, a leading label prefix, markdown
/// emphasis markers, whitespace collapse, trim.
pub fn clean_excerpt(raw: &str) -> String {
    let text = SURROUNDING_QUOTES.replace_all(raw.trim(), "");
    let text = LABEL_PREFIX.replace(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = UNDERSCORE.replace_all(&text, "$1");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}
