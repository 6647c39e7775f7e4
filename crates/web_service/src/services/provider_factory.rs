//! Provider construction from the current settings record.
//!
//! Settings are read on every generation request, so providers are built
//! per call rather than cached; a settings write applies immediately.

use std::time::Duration;

use completion_client::{CompletionProvider, ConnectionConfig, HttpCompletionClient};
use excerpt_core::ExcerptSettings;

use crate::error::AppError;

/// Per-call deviations from the settings record.
#[derive(Debug, Default)]
pub struct ProviderOverrides {
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl ProviderOverrides {
    pub fn none() -> Self {
        Self::default()
    }
}

pub trait ProviderFactory: Send + Sync {
    fn create(
        &self,
        settings: &ExcerptSettings,
        overrides: &ProviderOverrides,
    ) -> Result<Box<dyn CompletionProvider>, AppError>;
}

pub struct HttpProviderFactory;

impl ProviderFactory for HttpProviderFactory {
    fn create(
        &self,
        settings: &ExcerptSettings,
        overrides: &ProviderOverrides,
    ) -> Result<Box<dyn CompletionProvider>, AppError> {
        let config = ConnectionConfig {
            base_url: settings.api_base_url.clone(),
            api_key: settings.api_key.clone(),
            model: overrides
                .model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| settings.api_model.clone()),
            timeout: overrides
                .timeout
                .unwrap_or_else(|| Duration::from_secs(settings.request_timeout_secs)),
        };

        let client = HttpCompletionClient::new(config)?;
        Ok(Box::new(client))
    }
}
