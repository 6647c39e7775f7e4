use actix_web::{get, post, put, web, HttpRequest, HttpResponse};

use crate::dto::ModelListResponse;
use crate::error::AppError;
use crate::server::AppState;
use crate::services::settings_service::{masked_view, SettingsPatch};

const ACTING_ROLE_HEADER: &str = "x-acting-role";
const ADMIN_ROLE: &str = "administrator";

/// The settings surface is admin-only; the embedding host asserts the
/// acting user's role via header.
fn require_admin(req: &HttpRequest) -> Result<(), AppError> {
    let role = req
        .headers()
        .get(ACTING_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if role.trim().eq_ignore_ascii_case(ADMIN_ROLE) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(
            "Insufficient permissions.".to_string(),
        ))
    }
}

#[get("/settings")]
pub async fn get_settings(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;
    let settings = app_state.settings_service.current().await;
    Ok(HttpResponse::Ok().json(masked_view(settings)))
}

#[put("/settings")]
pub async fn update_settings(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<SettingsPatch>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;
    let stored = app_state
        .settings_service
        .apply_patch(payload.into_inner())
        .await?;
    log::info!("excerpt settings updated");
    Ok(HttpResponse::Ok().json(masked_view(stored)))
}

#[post("/settings/reset")]
pub async fn reset_settings(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;
    let stored = app_state.settings_service.reset_to_defaults().await?;
    log::info!("excerpt settings reset to defaults");
    Ok(HttpResponse::Ok().json(masked_view(stored)))
}

#[get("/models")]
pub async fn list_models(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;
    let models = app_state.excerpt_service.list_models().await?;
    Ok(HttpResponse::Ok().json(ModelListResponse { models }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_settings)
        .service(update_settings)
        .service(reset_settings)
        .service(list_models);
}
