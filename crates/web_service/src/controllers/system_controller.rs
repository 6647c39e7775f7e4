use actix_web::{get, web, HttpResponse};

use crate::error::AppError;

#[get("/health")]
pub async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
