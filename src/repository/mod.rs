use std::sync::Arc;
use tracing::error;

use crate::errors::{GoUrlsError, Result};

pub mod backends;
pub mod models;

pub use models::{UrlEntry, normalize_short_name};

use uuid::Uuid;

/// Persistence boundary for `UrlEntry` records.
///
/// Lookups return `Option`; mutations surface duplicate-name constraint
/// violations as `GoUrlsError::DuplicateShortName`.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Option<UrlEntry>;
    /// Exact short-name match, as stored
    async fn get_by_short_name(&self, short_name: &str) -> Option<UrlEntry>;
    /// Match on the normalized (trimmed, lowercased) short name
    async fn get_by_normalized(&self, normalized: &str) -> Option<UrlEntry>;
    /// Case-insensitive substring search; an empty fragment returns everything
    async fn search(&self, fragment: &str) -> Vec<UrlEntry>;
    async fn load_all(&self) -> Vec<UrlEntry>;
    async fn insert(&self, entry: UrlEntry) -> Result<()>;
    async fn update(&self, entry: UrlEntry) -> Result<()>;
    async fn remove(&self, id: Uuid) -> Result<()>;
    async fn backend_name(&self) -> String;
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(config: &crate::config::StaticConfig) -> Result<Arc<dyn Repository>> {
        let backend = &config.database.backend;
        let database_url = &config.database.database_url;

        match backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let repository =
                    backends::sea_orm::SeaOrmRepository::new(database_url, backend).await?;
                Ok(Arc::new(repository) as Arc<dyn Repository>)
            }
            "memory" => Ok(Arc::new(backends::memory::MemoryRepository::new()) as Arc<dyn Repository>),
            _ => {
                error!("Unknown repository backend: {}", backend);
                Err(GoUrlsError::configuration(format!(
                    "Unknown repository backend: {}. Supported: sqlite, mysql, postgres, mariadb, memory",
                    backend
                )))
            }
        }
    }
}
