//! Prompt assembly: placeholder substitution over the configured template.

use crate::error::TemplateError;
use crate::request::GenerationParams;
use crate::settings::ExcerptSettings;

pub const CONTENT_PLACEHOLDER: &str = "{{content}}";

/// Wording that suppresses the appended output instruction when the
/// template already asks for bare excerpt text.
const OUTPUT_ONLY_MARKERS: [&str; 2] = ["generate only the excerpt", "output only the excerpt"];

const OUTPUT_INSTRUCTION: &str =
    "Generate only the excerpt text, without any explanations, introductions, or formatting.";

/// Fully resolved values for the recognized placeholders. Request values
/// win over configured defaults; empty defaults resolve to the empty
/// string rather than leaving the placeholder in place.
#[derive(Debug, Clone, Default)]
pub struct PromptValues {
    pub content: String,
    pub title: String,
    pub style: String,
    pub tone: String,
    pub language: String,
    pub max_length: String,
    pub focus_keywords: String,
}

impl PromptValues {
    pub fn resolve(
        content: String,
        title: String,
        params: &GenerationParams,
        settings: &ExcerptSettings,
    ) -> Self {
        let max_length = params
            .requested_max_length()
            .unwrap_or(settings.default_max_length);

        Self {
            content,
            title,
            style: pick(&params.style, &settings.default_style),
            tone: pick(&params.tone, &settings.default_tone),
            language: pick(&params.language, &settings.default_language),
            max_length: max_length.to_string(),
            focus_keywords: pick(&params.focus_keywords, &settings.default_focus_keywords),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "content" => Some(&self.content),
            "title" => Some(&self.title),
            "style" => Some(&self.style),
            "tone" => Some(&self.tone),
            "language" => Some(&self.language),
            "max_length" => Some(&self.max_length),
            "focus_keywords" => Some(&self.focus_keywords),
            _ => None,
        }
    }
}

fn pick(request_value: &str, default_value: &str) -> String {
    let trimmed = request_value.trim();
    if trimmed.is_empty() {
        default_value.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Substitute placeholders and append the output instruction. Fails when
/// the template lacks `{{content}}`; content is never appended silently.
pub fn build_prompt(template: &str, values: &PromptValues) -> Result<String, TemplateError> {
    if !template.contains(CONTENT_PLACEHOLDER) {
        return Err(TemplateError::MissingContentPlaceholder);
    }

    let mut prompt = substitute(template, values);

    let lowered = template.to_lowercase();
    if !OUTPUT_ONLY_MARKERS.iter().any(|m| lowered.contains(m)) {
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_INSTRUCTION);
    }

    Ok(prompt)
}

/// Single left-to-right pass: recognized `{{name}}` tokens are replaced
/// literally, unrecognized ones pass through, and substituted values are
/// never re-scanned.
fn substitute(template: &str, values: &PromptValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(name_len) => {
                let name = &after_open[..name_len];
                match values.lookup(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + name_len + 2]),
                }
                rest = &after_open[name_len + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
