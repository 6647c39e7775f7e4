//! excerpt_core - Core types and text pipeline for AI excerpt generation
//!
//! This crate provides the domain logic shared by the excerpt service:
//! - `settings` - the persisted settings record and its normalization rules
//! - `request` - transient per-request generation parameters
//! - `sanitize` - markup stripping and content truncation
//! - `prompt` - placeholder substitution over the prompt template
//! - `cleanup` - post-processing of the raw provider reply

pub mod cleanup;
pub mod error;
pub mod prompt;
pub mod request;
pub mod sanitize;
pub mod settings;

// Re-export commonly used types
pub use cleanup::clean_excerpt;
pub use error::TemplateError;
pub use prompt::{build_prompt, PromptValues};
pub use request::GenerationParams;
pub use sanitize::sanitize_content;
pub use settings::ExcerptSettings;
