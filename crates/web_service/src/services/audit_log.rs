//! Opt-in audit trail for generation requests.
//!
//! Best-effort by contract: a failed write must never affect the
//! response path, so every error is swallowed after a debug note.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;
use tokio::fs;
use tokio::io::AsyncWriteExt;

const LOG_FILE_NAME: &str = "excerpt.log";

pub struct AuditLog {
    log_dir: PathBuf,
}

impl AuditLog {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            log_dir: base_dir.join("logs"),
        }
    }

    /// Append one line when logging is enabled. Never fails.
    pub async fn record(&self, enabled: bool, level: &str, message: &str) {
        if !enabled {
            return;
        }

        let line = format!(
            "[{}] [{}] {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            level.to_uppercase(),
            message
        );

        if let Err(err) = self.append(&line).await {
            debug!("audit log write failed: {err}");
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.log_dir).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_dir.join(LOG_FILE_NAME))
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_logging_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let audit = AuditLog::new(dir.path());
        audit.record(false, "info", "should not appear").await;
        assert!(!dir.path().join("logs").join(LOG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn enabled_logging_appends_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let audit = AuditLog::new(dir.path());
        audit.record(true, "info", "first entry").await;
        audit.record(true, "error", "second entry").await;

        let content = std::fs::read_to_string(dir.path().join("logs").join(LOG_FILE_NAME))
            .expect("log file");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO] first entry"));
        assert!(lines[1].contains("[ERROR] second entry"));
    }
}
