pub mod audit_log;
pub mod excerpt_service;
pub mod provider_factory;
pub mod settings_service;

pub use audit_log::AuditLog;
pub use excerpt_service::ExcerptService;
pub use provider_factory::{HttpProviderFactory, ProviderFactory, ProviderOverrides};
pub use settings_service::{masked_view, SettingsPatch, SettingsService};
