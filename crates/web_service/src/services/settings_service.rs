//! Settings persistence and normalization.

use std::path::{Path, PathBuf};

use excerpt_core::ExcerptSettings;
use serde::Deserialize;
use tokio::{fs, sync::RwLock};

use crate::error::AppError;

/// Partial update posted from the settings screen. Absent fields keep
/// their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPatch {
    pub api_base_url: Option<String>,
    pub api_model: Option<String>,
    pub api_key: Option<String>,
    pub default_style: Option<String>,
    pub default_tone: Option<String>,
    pub default_language: Option<String>,
    pub default_max_length: Option<u32>,
    pub default_focus_keywords: Option<String>,
    pub prompt_template: Option<String>,
    pub enabled_post_types: Option<Vec<String>>,
    pub max_content_length: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub allowed_roles: Option<Vec<String>>,
    pub enable_logging: Option<bool>,
}

pub struct SettingsService {
    storage_path: PathBuf,
    settings: RwLock<ExcerptSettings>,
}

impl SettingsService {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            storage_path: base_dir.join("settings.json"),
            settings: RwLock::new(ExcerptSettings::default()),
        }
    }

    /// Load the record from storage, writing defaults on first run.
    /// Environment overrides for the connection fields apply in memory
    /// only and are never persisted.
    pub async fn load_from_storage(&self) -> Result<(), AppError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut loaded = match fs::read_to_string(&self.storage_path).await {
            Ok(content) => serde_json::from_str::<ExcerptSettings>(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let defaults = ExcerptSettings::default();
                self.persist(&defaults).await?;
                defaults
            }
            Err(err) => return Err(AppError::StorageError(err)),
        };

        apply_env_overrides(&mut loaded);

        let mut guard = self.settings.write().await;
        *guard = loaded;
        Ok(())
    }

    pub async fn current(&self) -> ExcerptSettings {
        self.settings.read().await.clone()
    }

    /// Merge a patch into the record, normalize, persist, and return the
    /// stored result. A masked API key in the patch preserves the stored
    /// key so reads can round-trip through the settings screen.
    pub async fn apply_patch(&self, patch: SettingsPatch) -> Result<ExcerptSettings, AppError> {
        let mut guard = self.settings.write().await;

        if let Some(api_base_url) = patch.api_base_url {
            guard.api_base_url = api_base_url;
        }
        if let Some(api_model) = patch.api_model {
            guard.api_model = api_model;
        }
        if let Some(api_key) = patch.api_key {
            if !looks_masked(&api_key) {
                guard.api_key = api_key;
            }
        }
        if let Some(default_style) = patch.default_style {
            guard.default_style = default_style;
        }
        if let Some(default_tone) = patch.default_tone {
            guard.default_tone = default_tone;
        }
        if let Some(default_language) = patch.default_language {
            guard.default_language = default_language;
        }
        if let Some(default_max_length) = patch.default_max_length {
            guard.default_max_length = default_max_length;
        }
        if let Some(default_focus_keywords) = patch.default_focus_keywords {
            guard.default_focus_keywords = default_focus_keywords;
        }
        if let Some(prompt_template) = patch.prompt_template {
            guard.prompt_template = prompt_template;
        }
        if let Some(enabled_post_types) = patch.enabled_post_types {
            guard.enabled_post_types = enabled_post_types;
        }
        if let Some(max_content_length) = patch.max_content_length {
            guard.max_content_length = max_content_length;
        }
        if let Some(request_timeout_secs) = patch.request_timeout_secs {
            guard.request_timeout_secs = request_timeout_secs;
        }
        if let Some(allowed_roles) = patch.allowed_roles {
            guard.allowed_roles = allowed_roles;
        }
        if let Some(enable_logging) = patch.enable_logging {
            guard.enable_logging = enable_logging;
        }

        guard.normalize();
        self.persist(&guard).await?;
        Ok(guard.clone())
    }

    pub async fn reset_to_defaults(&self) -> Result<ExcerptSettings, AppError> {
        let mut guard = self.settings.write().await;
        *guard = ExcerptSettings::default();
        self.persist(&guard).await?;
        Ok(guard.clone())
    }

    async fn persist(&self, settings: &ExcerptSettings) -> Result<(), AppError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.storage_path, json).await?;
        Ok(())
    }
}

fn apply_env_overrides(settings: &mut ExcerptSettings) {
    if let Ok(api_key) = std::env::var("EXCERPT_API_KEY") {
        settings.api_key = api_key;
    }
    if let Ok(api_base) = std::env::var("EXCERPT_API_BASE") {
        settings.api_base_url = api_base;
    }
    if let Ok(model) = std::env::var("EXCERPT_API_MODEL") {
        settings.api_model = model;
    }
}

/// Mask an API key for display: first and last four characters with the
/// middle elided, or `***` for short keys. Empty keys stay empty.
pub fn masked_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

/// Copy of the record safe to return to the settings screen.
pub fn masked_view(mut settings: ExcerptSettings) -> ExcerptSettings {
    settings.api_key = masked_api_key(&settings.api_key);
    settings
}

fn looks_masked(value: &str) -> bool {
    value.contains("***") || value.contains("...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = SettingsService::new(dir.path());
        service.load_from_storage().await.unwrap();

        assert!(dir.path().join("settings.json").exists());
        let settings = service.current().await;
        assert_eq!(settings.api_model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn patch_persists_and_normalizes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = SettingsService::new(dir.path());
        service.load_from_storage().await.unwrap();

        let stored = service
            .apply_patch(SettingsPatch {
                api_key: Some("sk-1234567890abcdef".to_string()),
                max_content_length: Some(50),
                allowed_roles: Some(vec!["Editor".to_string(), "not a role!".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(stored.api_key, "sk-1234567890abcdef");
        assert_eq!(stored.max_content_length, 100);
        assert_eq!(stored.allowed_roles, vec!["editor"]);

        // Survives a reload from disk.
        let reloaded = SettingsService::new(dir.path());
        reloaded.load_from_storage().await.unwrap();
        assert_eq!(reloaded.current().await.max_content_length, 100);
    }

    #[tokio::test]
    async fn masked_key_in_patch_preserves_stored_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = SettingsService::new(dir.path());
        service.load_from_storage().await.unwrap();

        service
            .apply_patch(SettingsPatch {
                api_key: Some("sk-1234567890abcdef".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let masked = masked_api_key("sk-1234567890abcdef");
        service
            .apply_patch(SettingsPatch {
                api_key: Some(masked),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(service.current().await.api_key, "sk-1234567890abcdef");
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = SettingsService::new(dir.path());
        service.load_from_storage().await.unwrap();

        service
            .apply_patch(SettingsPatch {
                default_style: Some("punchy".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let settings = service.reset_to_defaults().await.unwrap();
        assert_eq!(settings.default_style, "descriptive");
    }

    #[test]
    fn masking_shapes() {
        assert_eq!(masked_api_key(""), "");
        assert_eq!(masked_api_key("short"), "***");
        assert_eq!(masked_api_key("sk-1234567890abcdef"), "sk-1...cdef");
    }
}
