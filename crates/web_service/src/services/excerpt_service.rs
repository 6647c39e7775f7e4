//! Pipeline orchestration: permission gate, host fetch, sanitize, prompt,
//! one provider call, cleanup. Strictly sequential, no state shared
//! between requests.

use std::sync::Arc;
use std::time::Duration;

use completion_client::{CompletionOptions, CompletionProvider};
use excerpt_core::{build_prompt, clean_excerpt, sanitize_content, PromptValues};
use log::{info, warn};

use crate::dto::{GenerateExcerptRequest, TestConnectionRequest};
use crate::error::AppError;
use crate::host::ContentHost;
use crate::services::audit_log::AuditLog;
use crate::services::provider_factory::{ProviderFactory, ProviderOverrides};
use crate::services::settings_service::SettingsService;

const ADMIN_ROLE: &str = "administrator";
const CONNECTION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ExcerptService {
    settings: Arc<SettingsService>,
    host: Arc<dyn ContentHost>,
    providers: Arc<dyn ProviderFactory>,
    audit: AuditLog,
}

impl ExcerptService {
    pub fn new(
        settings: Arc<SettingsService>,
        host: Arc<dyn ContentHost>,
        providers: Arc<dyn ProviderFactory>,
        audit: AuditLog,
    ) -> Self {
        Self {
            settings,
            host,
            providers,
            audit,
        }
    }

    /// Run the generation pipeline for one post and return the cleaned
    /// excerpt. Permission failures reject the request before any
    /// external call.
    pub async fn generate(&self, request: &GenerateExcerptRequest) -> Result<String, AppError> {
        let settings = self.settings.current().await;
        let logging = settings.enable_logging;

        if !self.host.verify_nonce(&request.nonce) {
            return Err(AppError::InvalidNonce);
        }
        if !settings.is_role_allowed(&request.role) {
            return Err(AppError::PermissionDenied(
                "Insufficient permissions.".to_string(),
            ));
        }

        let post = self
            .host
            .fetch_post(request.post_id)
            .await
            .map_err(AppError::InternalError)?
            .ok_or(AppError::PostNotFound(request.post_id))?;

        if !settings.is_post_type_enabled(&post.post_type) {
            return Err(AppError::PermissionDenied(format!(
                "Excerpt generation is not enabled for post type '{}'.",
                post.post_type
            )));
        }

        self.audit
            .record(
                logging,
                "info",
                &format!(
                    "excerpt request for post #{}, params: {}",
                    post.id,
                    serde_json::to_string(&request.params).unwrap_or_default()
                ),
            )
            .await;

        let content = sanitize_content(&post.body, settings.content_length_cap());
        let values = PromptValues::resolve(content, post.title.clone(), &request.params, &settings);
        let prompt = build_prompt(&settings.prompt_template, &values)?;

        let provider = self.providers.create(&settings, &ProviderOverrides::none())?;

        self.audit
            .record(
                logging,
                "info",
                &format!(
                    "dispatching prompt for post #{} ({} chars) to model {}",
                    post.id,
                    prompt.chars().count(),
                    settings.api_model
                ),
            )
            .await;

        let options = CompletionOptions::for_excerpt(request.params.requested_max_length());
        let raw = match provider.complete(&prompt, &options).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!("excerpt generation failed for post #{}: {err}", post.id);
                self.audit
                    .record(logging, "error", &format!("provider call failed: {err}"))
                    .await;
                return Err(err.into());
            }
        };

        let excerpt = clean_excerpt(&raw);
        info!(
            "generated excerpt for post #{} ({} chars)",
            post.id,
            excerpt.chars().count()
        );
        self.audit
            .record(
                logging,
                "info",
                &format!("excerpt generated for post #{} ({} chars)", post.id, excerpt.chars().count()),
            )
            .await;

        Ok(excerpt)
    }

    /// Validate the connection with a minimal completion call. Restricted
    /// to administrators; an optional model override lets the settings
    /// screen probe a model before saving it.
    pub async fn test_connection(&self, request: &TestConnectionRequest) -> Result<(), AppError> {
        let settings = self.settings.current().await;

        if !self.host.verify_nonce(&request.nonce) {
            return Err(AppError::InvalidNonce);
        }
        if !request.role.trim().eq_ignore_ascii_case(ADMIN_ROLE) {
            return Err(AppError::PermissionDenied(
                "Insufficient permissions.".to_string(),
            ));
        }

        let provider = self.providers.create(
            &settings,
            &ProviderOverrides {
                model: request.model.clone(),
                timeout: Some(CONNECTION_PROBE_TIMEOUT),
            },
        )?;

        provider.test_connection().await?;

        self.audit
            .record(settings.enable_logging, "info", "connection test succeeded")
            .await;

        Ok(())
    }

    /// Model identifiers offered by the configured provider.
    pub async fn list_models(&self) -> Result<Vec<String>, AppError> {
        let settings = self.settings.current().await;
        let provider = self.providers.create(&settings, &ProviderOverrides::none())?;
        Ok(provider.list_models().await?)
    }
}
