//! URL directory service
//!
//! Business logic for the short-name directory: creation with the
//! reserved-word and uniqueness gates, ownership-checked update and delete,
//! and the lookup/search operations. Shared by all HTTP handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{GoUrlsError, Result};
use crate::repository::{Repository, UrlEntry, normalize_short_name};
use crate::services::permissions::can_modify;
use crate::services::reserved::ReservedWords;

// ============ Request/Response DTOs ============

/// Payload for creating a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub short_name: String,
    pub long_url: String,
}

/// Payload for updating an existing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    pub short_name: String,
    pub long_url: String,
}

/// Entry as returned to callers, annotated with the authorizer's verdict
/// for the acting identity. `can_edit` and `can_delete` carry the same
/// value since one rule governs both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEntryDto {
    pub id: Uuid,
    pub short_name: String,
    pub long_url: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub is_system_entry: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl UrlEntryDto {
    pub fn from_entry(entry: UrlEntry, identity: &str) -> Self {
        let allowed = can_modify(identity, &entry);
        Self {
            id: entry.id,
            short_name: entry.short_name,
            long_url: entry.long_url,
            created_by: entry.created_by,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            updated_by: entry.updated_by,
            is_system_entry: entry.is_system_entry,
            can_edit: allowed,
            can_delete: allowed,
        }
    }
}

// ============ UrlDirectory Implementation ============

/// Service for URL entry management.
///
/// Validation happens before any write, so a rejected operation never leaves
/// partial state behind. Uniqueness is re-checked by the storage layer's
/// unique index at write time; the checks here exist for better error
/// messages on the fast path.
pub struct UrlDirectory {
    repository: Arc<dyn Repository>,
    reserved: Arc<ReservedWords>,
}

impl UrlDirectory {
    pub fn new(repository: Arc<dyn Repository>, reserved: Arc<ReservedWords>) -> Self {
        Self {
            repository,
            reserved,
        }
    }

    fn validate_payload(short_name: &str, long_url: &str) -> Result<()> {
        if short_name.trim().is_empty() {
            return Err(GoUrlsError::validation("Short name must not be empty."));
        }
        if long_url.is_empty() {
            return Err(GoUrlsError::validation("Long URL must not be empty."));
        }
        Ok(())
    }

    fn check_reserved(&self, short_name: &str) -> Result<()> {
        if self.reserved.is_reserved(short_name) {
            return Err(GoUrlsError::reserved_short_name(format!(
                "'{}' is a reserved word and cannot be used as a short URL.",
                short_name.trim()
            )));
        }
        Ok(())
    }

    // ============ CRUD Operations ============

    /// Create a new entry on behalf of `identity`
    pub async fn create(&self, identity: &str, req: CreateUrlRequest) -> Result<UrlEntryDto> {
        Self::validate_payload(&req.short_name, &req.long_url)?;
        self.check_reserved(&req.short_name)?;

        let short_name = req.short_name.trim().to_string();
        let normalized = normalize_short_name(&short_name);

        if self.repository.get_by_normalized(&normalized).await.is_some() {
            return Err(GoUrlsError::duplicate_short_name(format!(
                "Short name '{}' is already taken.",
                short_name
            )));
        }

        let entry = UrlEntry {
            id: Uuid::new_v4(),
            short_name,
            long_url: req.long_url,
            created_by: identity.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            updated_by: None,
            is_system_entry: false,
        };

        self.repository.insert(entry.clone()).await?;

        info!(
            "Directory: '{}' created '{}' -> '{}'",
            identity, entry.short_name, entry.long_url
        );
        Ok(UrlEntryDto::from_entry(entry, identity))
    }

    /// Update an existing entry; never touches created_by/created_at/
    /// is_system_entry or the id.
    pub async fn update(
        &self,
        identity: &str,
        id: Uuid,
        req: UpdateUrlRequest,
    ) -> Result<UrlEntryDto> {
        let existing = self
            .repository
            .get_by_id(id)
            .await
            .ok_or_else(|| GoUrlsError::not_found(format!("Url entry '{}' not found", id)))?;

        if !can_modify(identity, &existing) {
            return Err(GoUrlsError::forbidden(
                "You don't have permission to modify this URL entry.",
            ));
        }

        Self::validate_payload(&req.short_name, &req.long_url)?;

        let short_name = req.short_name.trim().to_string();
        let normalized = normalize_short_name(&short_name);

        // Reserved and uniqueness gates only apply when the name is changing
        if normalized != existing.normalized_name() {
            self.check_reserved(&short_name)?;

            if let Some(other) = self.repository.get_by_normalized(&normalized).await
                && other.id != id
            {
                return Err(GoUrlsError::duplicate_short_name(format!(
                    "Short name '{}' is already taken.",
                    short_name
                )));
            }
        }

        let updated = UrlEntry {
            id: existing.id,
            short_name,
            long_url: req.long_url,
            created_by: existing.created_by,
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
            updated_by: Some(identity.to_string()),
            is_system_entry: existing.is_system_entry,
        };

        self.repository.update(updated.clone()).await?;

        info!("Directory: '{}' updated '{}'", identity, updated.short_name);
        Ok(UrlEntryDto::from_entry(updated, identity))
    }

    /// Permanently delete an entry
    pub async fn delete(&self, identity: &str, id: Uuid) -> Result<()> {
        let existing = self
            .repository
            .get_by_id(id)
            .await
            .ok_or_else(|| GoUrlsError::not_found(format!("Url entry '{}' not found", id)))?;

        if !can_modify(identity, &existing) {
            return Err(GoUrlsError::forbidden(
                "You don't have permission to delete this URL entry.",
            ));
        }

        self.repository.remove(id).await?;

        info!(
            "Directory: '{}' deleted '{}'",
            identity, existing.short_name
        );
        Ok(())
    }

    // ============ Lookups ============

    pub async fn get_by_id(&self, identity: &str, id: Uuid) -> Result<UrlEntryDto> {
        self.repository
            .get_by_id(id)
            .await
            .map(|entry| UrlEntryDto::from_entry(entry, identity))
            .ok_or_else(|| GoUrlsError::not_found(format!("Url entry '{}' not found", id)))
    }

    /// Exact short-name match, as stored
    pub async fn get_by_short_name(&self, identity: &str, short_name: &str) -> Result<UrlEntryDto> {
        self.repository
            .get_by_short_name(short_name)
            .await
            .map(|entry| UrlEntryDto::from_entry(entry, identity))
            .ok_or_else(|| {
                GoUrlsError::not_found(format!("Url entry '{}' not found", short_name))
            })
    }

    /// Case-insensitive substring search; empty fragment returns all entries
    pub async fn search(&self, identity: &str, fragment: &str) -> Vec<UrlEntryDto> {
        self.repository
            .search(fragment)
            .await
            .into_iter()
            .map(|entry| UrlEntryDto::from_entry(entry, identity))
            .collect()
    }

    pub async fn list_all(&self, identity: &str) -> Vec<UrlEntryDto> {
        self.repository
            .load_all()
            .await
            .into_iter()
            .map(|entry| UrlEntryDto::from_entry(entry, identity))
            .collect()
    }
}
