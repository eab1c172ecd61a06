use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical form of a short name, used for uniqueness and redirect lookup
pub fn normalize_short_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single short-alias mapping, the only persisted entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlEntry {
    pub id: Uuid,
    pub short_name: String,
    pub long_url: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub is_system_entry: bool,
}

impl UrlEntry {
    pub fn normalized_name(&self) -> String {
        normalize_short_name(&self.short_name)
    }
}
