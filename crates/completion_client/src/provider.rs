use async_trait::async_trait;

use crate::error::{ProviderError, Result};

const EXCERPT_TEMPERATURE: f64 = 0.7;
const EXCERPT_TOKEN_CEILING: u32 = 1_000;
const EXCERPT_TOKEN_DEFAULT: u32 = 600;

const CONNECTION_PROBE_PROMPT: &str = "Say \"test\"";

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionOptions {
    /// Token budget for excerpt generation: roughly four tokens per
    /// target word, capped, with a fixed budget when no target is given.
    pub fn for_excerpt(max_length_words: Option<u32>) -> Self {
        let max_tokens = max_length_words
            .filter(|n| *n > 0)
            .map(|n| (n.saturating_mul(4)).min(EXCERPT_TOKEN_CEILING))
            .unwrap_or(EXCERPT_TOKEN_DEFAULT);
        Self {
            max_tokens,
            temperature: EXCERPT_TEMPERATURE,
        }
    }

    /// Tight, low-temperature options for the connection probe.
    pub fn connection_probe() -> Self {
        Self {
            max_tokens: 5,
            temperature: 0.1,
        }
    }
}

/// The capability the pipeline is handed: given a prompt, return text or
/// a typed error. Implementations must not retry on their own.
#[async_trait]
pub trait CompletionProvider: Send + Sync + std::fmt::Debug {
    /// Run one completion call for `prompt` and return the reply text.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;

    /// List model identifiers offered by the provider.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }

    /// Minimal completion call with a short deterministic prompt, used to
    /// validate configuration. Succeeds on any non-empty reply.
    async fn test_connection(&self) -> Result<()> {
        let reply = self
            .complete(CONNECTION_PROBE_PROMPT, &CompletionOptions::connection_probe())
            .await?;
        if reply.trim().is_empty() {
            return Err(ProviderError::MissingContent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_budget_scales_with_word_target() {
        assert_eq!(CompletionOptions::for_excerpt(Some(150)).max_tokens, 600);
        assert_eq!(CompletionOptions::for_excerpt(Some(50)).max_tokens, 200);
    }

    #[test]
    fn excerpt_budget_is_capped() {
        assert_eq!(CompletionOptions::for_excerpt(Some(400)).max_tokens, 1_000);
    }

    #[test]
    fn absent_or_zero_target_uses_fixed_budget() {
        assert_eq!(CompletionOptions::for_excerpt(None).max_tokens, 600);
        assert_eq!(CompletionOptions::for_excerpt(Some(0)).max_tokens, 600);
    }
}
