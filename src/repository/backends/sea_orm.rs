use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    ExprTrait, QueryFilter, SqlErr,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::{GoUrlsError, Result};
use crate::repository::{Repository, UrlEntry};

use migration::{Migrator, MigratorTrait, entities::url_entry};

#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmRepository {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(GoUrlsError::database_connection(
                "database_url is not set".to_string(),
            ));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let repository = SeaOrmRepository {
            db,
            backend_name: backend_name.to_string(),
        };

        repository.run_migrations().await?;

        warn!(
            "{} repository initialized.",
            repository.backend_name.to_uppercase()
        );
        Ok(repository)
    }

    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                GoUrlsError::database_connection(format!("Invalid SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            GoUrlsError::database_connection(format!("Cannot connect to SQLite database: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(20)
            .min_connections(2)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            GoUrlsError::database_connection(format!(
                "Cannot connect to {} database: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| GoUrlsError::database_operation(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    fn model_to_entry(model: url_entry::Model) -> UrlEntry {
        UrlEntry {
            id: model.id,
            short_name: model.short_name,
            long_url: model.long_url,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
            is_system_entry: model.is_system_entry,
        }
    }

    fn entry_to_active_model(entry: &UrlEntry, is_new: bool) -> url_entry::ActiveModel {
        use sea_orm::ActiveValue::*;

        url_entry::ActiveModel {
            id: if is_new { Set(entry.id) } else { Unchanged(entry.id) },
            short_name: Set(entry.short_name.clone()),
            short_name_norm: Set(entry.normalized_name()),
            long_url: Set(entry.long_url.clone()),
            created_by: if is_new {
                Set(entry.created_by.clone())
            } else {
                NotSet
            },
            created_at: if is_new { Set(entry.created_at) } else { NotSet },
            updated_at: Set(entry.updated_at),
            updated_by: Set(entry.updated_by.clone()),
            is_system_entry: if is_new {
                Set(entry.is_system_entry)
            } else {
                NotSet
            },
        }
    }

    /// Map a unique index violation to the duplicate-name validation error;
    /// the index is the source of truth for short-name uniqueness.
    fn map_write_error(entry: &UrlEntry, err: sea_orm::DbErr) -> GoUrlsError {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            GoUrlsError::duplicate_short_name(format!(
                "Short name '{}' is already taken.",
                entry.short_name
            ))
        } else {
            GoUrlsError::database_operation(format!("Failed to write url entry: {}", err))
        }
    }
}

#[async_trait]
impl Repository for SeaOrmRepository {
    async fn get_by_id(&self, id: Uuid) -> Option<UrlEntry> {
        match url_entry::Entity::find_by_id(id).one(&self.db).await {
            Ok(model) => model.map(Self::model_to_entry),
            Err(e) => {
                error!("Failed to query url entry by id {}: {}", id, e);
                None
            }
        }
    }

    async fn get_by_short_name(&self, short_name: &str) -> Option<UrlEntry> {
        match url_entry::Entity::find()
            .filter(url_entry::Column::ShortName.eq(short_name))
            .one(&self.db)
            .await
        {
            Ok(model) => model.map(Self::model_to_entry),
            Err(e) => {
                error!("Failed to query url entry '{}': {}", short_name, e);
                None
            }
        }
    }

    async fn get_by_normalized(&self, normalized: &str) -> Option<UrlEntry> {
        match url_entry::Entity::find()
            .filter(url_entry::Column::ShortNameNorm.eq(normalized))
            .one(&self.db)
            .await
        {
            Ok(model) => model.map(Self::model_to_entry),
            Err(e) => {
                error!("Failed to query url entry '{}': {}", normalized, e);
                None
            }
        }
    }

    async fn search(&self, fragment: &str) -> Vec<UrlEntry> {
        use sea_orm::sea_query::{Expr, LikeExpr};

        let mut query = url_entry::Entity::find();
        if !fragment.is_empty() {
            // Escape LIKE metacharacters so the fragment matches literally
            let needle = fragment
                .trim()
                .to_lowercase()
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            query = query.filter(
                Expr::col(url_entry::Column::ShortNameNorm)
                    .like(LikeExpr::new(format!("%{}%", needle)).escape('\\')),
            );
        }

        match query.all(&self.db).await {
            Ok(models) => models.into_iter().map(Self::model_to_entry).collect(),
            Err(e) => {
                error!("Failed to search url entries for '{}': {}", fragment, e);
                Vec::new()
            }
        }
    }

    async fn load_all(&self) -> Vec<UrlEntry> {
        match url_entry::Entity::find().all(&self.db).await {
            Ok(models) => models.into_iter().map(Self::model_to_entry).collect(),
            Err(e) => {
                error!("Failed to load url entries: {}", e);
                Vec::new()
            }
        }
    }

    async fn insert(&self, entry: UrlEntry) -> Result<()> {
        let active_model = Self::entry_to_active_model(&entry, true);

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_error(&entry, e))?;

        info!("Url entry created: {} -> {}", entry.short_name, entry.long_url);
        Ok(())
    }

    async fn update(&self, entry: UrlEntry) -> Result<()> {
        let active_model = Self::entry_to_active_model(&entry, false);

        active_model
            .update(&self.db)
            .await
            .map_err(|e| Self::map_write_error(&entry, e))?;

        info!("Url entry updated: {}", entry.short_name);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let result = url_entry::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                GoUrlsError::database_operation(format!("Failed to delete url entry: {}", e))
            })?;

        if result.rows_affected == 0 {
            return Err(GoUrlsError::not_found(format!(
                "Url entry '{}' not found",
                id
            )));
        }

        info!("Url entry deleted: {}", id);
        Ok(())
    }

    async fn backend_name(&self) -> String {
        self.backend_name.clone()
    }
}
