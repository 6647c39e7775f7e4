use actix_web::{post, web, HttpResponse};

use crate::dto::{
    GenerateExcerptRequest, GenerateExcerptResponse, TestConnectionRequest, TestConnectionResponse,
};
use crate::error::AppError;
use crate::server::AppState;

#[post("/excerpt/generate")]
pub async fn generate_excerpt(
    app_state: web::Data<AppState>,
    payload: web::Json<GenerateExcerptRequest>,
) -> Result<HttpResponse, AppError> {
    let excerpt = app_state.excerpt_service.generate(&payload).await?;
    Ok(HttpResponse::Ok().json(GenerateExcerptResponse::new(excerpt)))
}

#[post("/excerpt/test-connection")]
pub async fn test_connection(
    app_state: web::Data<AppState>,
    payload: web::Json<TestConnectionRequest>,
) -> Result<HttpResponse, AppError> {
    app_state.excerpt_service.test_connection(&payload).await?;
    Ok(HttpResponse::Ok().json(TestConnectionResponse {
        success: true,
        message: "Provider connection successful!".to_string(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_excerpt).service(test_connection);
}
