//! Request/response shapes for the excerpt endpoints.

use excerpt_core::GenerationParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateExcerptRequest {
    pub post_id: u64,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

#[derive(Debug, Serialize)]
pub struct GenerateExcerptResponse {
    pub success: bool,
    pub excerpt: String,
}

impl GenerateExcerptResponse {
    pub fn new(excerpt: String) -> Self {
        Self {
            success: true,
            excerpt,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TestConnectionRequest {
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ModelListResponse {
    pub models: Vec<String>,
}
