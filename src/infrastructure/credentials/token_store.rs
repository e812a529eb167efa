//! File-backed token store with per-acting-user write locks

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::credentials::{StoredToken, TokenStore};
use crate::domain::DomainError;

/// Persists one serialized token blob per acting-user under a directory.
/// A missing blob is not an error; it triggers the next resolution tier.
#[derive(Debug)]
pub struct FileTokenStore {
    dir: PathBuf,
    locks: tokio::sync::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    fn token_path(&self, acting_user: &str) -> PathBuf {
        let safe: String = acting_user
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, acting_user: &str) -> Result<Option<StoredToken>, DomainError> {
        let path = self.token_path(acting_user);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::token_store(format!(
                    "failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let token = serde_json::from_slice(&raw).map_err(|e| {
            DomainError::token_store(format!("corrupt token blob '{}': {}", path.display(), e))
        })?;

        Ok(Some(token))
    }

    async fn save(&self, acting_user: &str, token: &StoredToken) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::token_store(format!(
                "failed to create '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.token_path(acting_user);
        let raw = serde_json::to_vec_pretty(token)
            .map_err(|e| DomainError::token_store(format!("failed to serialize token: {}", e)))?;

        tokio::fs::write(&path, raw).await.map_err(|e| {
            DomainError::token_store(format!("failed to write '{}': {}", path.display(), e))
        })
    }

    async fn user_lock(&self, acting_user: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(acting_user.to_string())
            .or_default()
            .clone()
    }
}
