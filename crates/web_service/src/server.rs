use std::{path::PathBuf, sync::Arc};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use crate::controllers::{excerpt_controller, settings_controller, system_controller};
use crate::host::{ContentHost, JsonPostStore};
use crate::services::{
    AuditLog, ExcerptService, HttpProviderFactory, ProviderFactory, SettingsService,
};

pub struct AppState {
    pub settings_service: Arc<SettingsService>,
    pub excerpt_service: Arc<ExcerptService>,
}

const DEFAULT_WORKER_COUNT: usize = 4;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(excerpt_controller::config)
            .configure(settings_controller::config)
            .configure(system_controller::config),
    );
}

pub async fn run(app_data_dir: PathBuf, port: u16) -> Result<(), String> {
    info!("Starting excerpt service...");

    let settings_service = Arc::new(SettingsService::new(&app_data_dir));
    settings_service
        .load_from_storage()
        .await
        .map_err(|e| format!("Failed to load settings: {e}"))?;

    let host: Arc<dyn ContentHost> = Arc::new(JsonPostStore::new(&app_data_dir));
    let providers: Arc<dyn ProviderFactory> = Arc::new(HttpProviderFactory);
    let excerpt_service = Arc::new(ExcerptService::new(
        settings_service.clone(),
        host,
        providers,
        AuditLog::new(&app_data_dir),
    ));

    let app_state = web::Data::new(AppState {
        settings_service,
        excerpt_service,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Excerpt service listening on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
