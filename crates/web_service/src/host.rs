//! Host-application boundary.
//!
//! The embedding application owns posts, users, and request-authenticity
//! tokens; this service only sees them through the [`ContentHost`]
//! capability. The bundled [`JsonPostStore`] backs the standalone binary
//! with a flat `posts.json` file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
}

fn default_post_type() -> String {
    "post".to_string()
}

#[async_trait]
pub trait ContentHost: Send + Sync {
    /// Look up a post by identifier. `None` when the host does not know it.
    async fn fetch_post(&self, post_id: u64) -> Result<Option<PostRecord>>;

    /// Verify a request-authenticity token issued by the host.
    fn verify_nonce(&self, nonce: &str) -> bool;
}

/// File-backed post store for standalone operation. Reads `posts.json`
/// (an array of post records) on every lookup so edits apply without a
/// restart. It has no session model, so any non-empty token passes;
/// embedding applications supply a real check.
pub struct JsonPostStore {
    storage_path: PathBuf,
}

impl JsonPostStore {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            storage_path: base_dir.join("posts.json"),
        }
    }
}

#[async_trait]
impl ContentHost for JsonPostStore {
    async fn fetch_post(&self, post_id: u64) -> Result<Option<PostRecord>> {
        let content = match fs::read_to_string(&self.storage_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let posts: Vec<PostRecord> = serde_json::from_str(&content)?;
        Ok(posts.into_iter().find(|p| p.id == post_id))
    }

    fn verify_nonce(&self, nonce: &str) -> bool {
        !nonce.trim().is_empty()
    }
}
