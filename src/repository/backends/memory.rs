use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::errors::{GoUrlsError, Result};
use crate::repository::{Repository, UrlEntry, normalize_short_name};

/// In-process repository, used by tests and throwaway deployments.
///
/// Enforces the same normalized-name uniqueness the SQL backends get from
/// their unique index.
#[derive(Default)]
pub struct MemoryRepository {
    entries: RwLock<HashMap<Uuid, UrlEntry>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_by_id(&self, id: Uuid) -> Option<UrlEntry> {
        self.entries.read().get(&id).cloned()
    }

    async fn get_by_short_name(&self, short_name: &str) -> Option<UrlEntry> {
        self.entries
            .read()
            .values()
            .find(|e| e.short_name == short_name)
            .cloned()
    }

    async fn get_by_normalized(&self, normalized: &str) -> Option<UrlEntry> {
        self.entries
            .read()
            .values()
            .find(|e| e.normalized_name() == normalized)
            .cloned()
    }

    async fn search(&self, fragment: &str) -> Vec<UrlEntry> {
        let needle = normalize_short_name(fragment);
        self.entries
            .read()
            .values()
            .filter(|e| e.normalized_name().contains(&needle))
            .cloned()
            .collect()
    }

    async fn load_all(&self) -> Vec<UrlEntry> {
        self.entries.read().values().cloned().collect()
    }

    async fn insert(&self, entry: UrlEntry) -> Result<()> {
        let mut entries = self.entries.write();

        let normalized = entry.normalized_name();
        if entries.values().any(|e| e.normalized_name() == normalized) {
            return Err(GoUrlsError::duplicate_short_name(format!(
                "Short name '{}' is already taken.",
                entry.short_name
            )));
        }

        entries.insert(entry.id, entry);
        Ok(())
    }

    async fn update(&self, entry: UrlEntry) -> Result<()> {
        let mut entries = self.entries.write();

        if !entries.contains_key(&entry.id) {
            return Err(GoUrlsError::not_found(format!(
                "Url entry '{}' not found",
                entry.id
            )));
        }

        let normalized = entry.normalized_name();
        if entries
            .values()
            .any(|e| e.id != entry.id && e.normalized_name() == normalized)
        {
            return Err(GoUrlsError::duplicate_short_name(format!(
                "Short name '{}' is already taken.",
                entry.short_name
            )));
        }

        entries.insert(entry.id, entry);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.remove(&id) {
            Some(_) => Ok(()),
            None => Err(GoUrlsError::not_found(format!(
                "Url entry '{}' not found",
                id
            ))),
        }
    }

    async fn backend_name(&self) -> String {
        "memory".to_string()
    }
}
