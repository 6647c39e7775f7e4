use serde::{Deserialize, Serialize};

/// Prompt template shipped with a fresh install. Contains `{{content}}`,
/// which the prompt builder requires.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Generate a concise and engaging excerpt for a blog post.

Post Content:
{{content}}

Title: {{title}}
Writing Style: {{style}}
Tone: {{tone}}
Target Length: {{max_length}} words
Language: {{language}}
Keywords to focus on: {{focus_keywords}}

Requirements:
1. Capture the essence and main points
2. Make it compelling to read the full article
3. Use natural, flowing language
4. Do not use markdown, quotes, or special formatting
5. Output only the excerpt text";

pub const CONTENT_LENGTH_MIN: u32 = 100;
pub const CONTENT_LENGTH_MAX: u32 = 16_000;
pub const CONTENT_LENGTH_FALLBACK: u32 = 4_000;

const MAX_LENGTH_MIN: u32 = 10;
const MAX_LENGTH_MAX: u32 = 500;
const TIMEOUT_MIN_SECS: u64 = 1;
const TIMEOUT_MAX_SECS: u64 = 300;

/// The persisted settings record. Written only through the settings
/// endpoints; read on every generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptSettings {
    pub api_base_url: String,
    pub api_model: String,
    pub api_key: String,

    pub default_style: String,
    pub default_tone: String,
    pub default_language: String,
    pub default_max_length: u32,
    pub default_focus_keywords: String,

    pub prompt_template: String,

    pub enabled_post_types: Vec<String>,
    pub max_content_length: u32,
    pub request_timeout_secs: u64,
    pub allowed_roles: Vec<String>,

    pub enable_logging: bool,
}

impl Default for ExcerptSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_model: "gpt-3.5-turbo".to_string(),
            api_key: String::new(),
            default_style: "descriptive".to_string(),
            default_tone: "neutral".to_string(),
            default_language: "en".to_string(),
            default_max_length: 150,
            default_focus_keywords: String::new(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            enabled_post_types: vec!["post".to_string()],
            max_content_length: CONTENT_LENGTH_FALLBACK,
            request_timeout_secs: 30,
            allowed_roles: vec![
                "administrator".to_string(),
                "editor".to_string(),
                "author".to_string(),
            ],
            enable_logging: false,
        }
    }
}

impl ExcerptSettings {
    /// Normalize the record after a write: trim and sanitize free text,
    /// clamp numeric ranges, drop list tokens that are not key-form.
    pub fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.api_model = self.api_model.trim().to_string();
        self.api_key = self.api_key.trim().to_string();

        self.default_style = sanitize_text(&self.default_style);
        self.default_tone = sanitize_text(&self.default_tone);
        self.default_language = sanitize_text(&self.default_language);
        self.default_focus_keywords = sanitize_text(&self.default_focus_keywords);

        self.prompt_template = self.prompt_template.trim().to_string();

        self.default_max_length = self.default_max_length.clamp(MAX_LENGTH_MIN, MAX_LENGTH_MAX);
        self.max_content_length = self
            .max_content_length
            .clamp(CONTENT_LENGTH_MIN, CONTENT_LENGTH_MAX);
        self.request_timeout_secs = self
            .request_timeout_secs
            .clamp(TIMEOUT_MIN_SECS, TIMEOUT_MAX_SECS);

        self.enabled_post_types = sanitize_keys(&self.enabled_post_types);
        self.allowed_roles = sanitize_keys(&self.allowed_roles);
    }

    /// Content cap with the out-of-range fallback applied. Stored values
    /// can predate normalization, so the fallback is enforced at the
    /// point of use as well.
    pub fn content_length_cap(&self) -> u32 {
        if (CONTENT_LENGTH_MIN..=CONTENT_LENGTH_MAX).contains(&self.max_content_length) {
            self.max_content_length
        } else {
            CONTENT_LENGTH_FALLBACK
        }
    }

    pub fn is_role_allowed(&self, role: &str) -> bool {
        let role = role.trim().to_ascii_lowercase();
        self.allowed_roles.iter().any(|r| r == &role)
    }

    pub fn is_post_type_enabled(&self, post_type: &str) -> bool {
        let post_type = post_type.trim().to_ascii_lowercase();
        self.enabled_post_types.iter().any(|t| t == &post_type)
    }
}

/// Trim, strip control characters, and fold newlines into spaces.
pub fn sanitize_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\n' || ch == '\r' || ch == '\t' {
            out.push(' ');
        } else if !ch.is_control() {
            out.push(ch);
        }
    }
    out.trim().to_string()
}

/// Lowercase key-form token: letters, digits, underscore, dash.
pub fn sanitize_key(value: &str) -> Option<String> {
    let key = value.trim().to_ascii_lowercase();
    if key.is_empty() {
        return None;
    }
    if key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        Some(key)
    } else {
        None
    }
}

fn sanitize_keys(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if let Some(key) = sanitize_key(value) {
            if !out.contains(&key) {
                out.push(key);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_content_placeholder() {
        let settings = ExcerptSettings::default();
        assert!(settings.prompt_template.contains("{{content}}"));
        assert_eq!(settings.default_max_length, 150);
        assert_eq!(settings.max_content_length, 4000);
    }

    #[test]
    fn normalize_clamps_numeric_fields() {
        let mut settings = ExcerptSettings {
            max_content_length: 50,
            default_max_length: 10_000,
            request_timeout_secs: 0,
            ..Default::default()
        };
        settings.normalize();
        assert_eq!(settings.max_content_length, CONTENT_LENGTH_MIN);
        assert_eq!(settings.default_max_length, 500);
        assert_eq!(settings.request_timeout_secs, 1);
    }

    #[test]
    fn normalize_drops_invalid_list_tokens() {
        let mut settings = ExcerptSettings {
            enabled_post_types: vec![
                "Post".to_string(),
                "my page".to_string(),
                "docs".to_string(),
                "post".to_string(),
            ],
            allowed_roles: vec!["Editor".to_string(), "<script>".to_string()],
            ..Default::default()
        };
        settings.normalize();
        assert_eq!(settings.enabled_post_types, vec!["post", "docs"]);
        assert_eq!(settings.allowed_roles, vec!["editor"]);
    }

    #[test]
    fn normalize_strips_trailing_slash_from_base_url() {
        let mut settings = ExcerptSettings {
            api_base_url: "https://api.example.com/v1/".to_string(),
            ..Default::default()
        };
        settings.normalize();
        assert_eq!(settings.api_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn content_length_cap_falls_back_when_out_of_range() {
        let settings = ExcerptSettings {
            max_content_length: 10,
            ..Default::default()
        };
        assert_eq!(settings.content_length_cap(), CONTENT_LENGTH_FALLBACK);

        let settings = ExcerptSettings {
            max_content_length: 2000,
            ..Default::default()
        };
        assert_eq!(settings.content_length_cap(), 2000);
    }

    #[test]
    fn role_and_post_type_checks_ignore_case() {
        let settings = ExcerptSettings::default();
        assert!(settings.is_role_allowed("Editor"));
        assert!(!settings.is_role_allowed("subscriber"));
        assert!(settings.is_post_type_enabled("POST"));
        assert!(!settings.is_post_type_enabled("page"));
    }

    #[test]
    fn sanitize_text_folds_newlines_and_strips_controls() {
        assert_eq!(sanitize_text("  a\nb\u{0007}c  "), "a b c");
    }

    #[test]
    fn partial_settings_json_fills_in_defaults() {
        let settings: ExcerptSettings =
            serde_json::from_str(r#"{"api_model": "gpt-4o-mini"}"#).unwrap();
        assert_eq!(settings.api_model, "gpt-4o-mini");
        assert_eq!(settings.default_style, "descriptive");
    }
}
