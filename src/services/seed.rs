//! Startup seeding
//!
//! A fixed set of system entries is inserted once; ids are stable, so the
//! pass is idempotent. Seeding is best-effort: the service starts and
//! operates even if some or all inserts fail.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::repository::{Repository, UrlEntry};
use crate::services::permissions::SYSTEM_IDENTITY;

/// (stable id, short name, long url)
const SEED_ENTRIES: &[(&str, &str, &str)] = &[
    (
        "550e8400-e29b-41d4-a716-446655440001",
        "wiki",
        "https://wiki.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440002",
        "mail",
        "https://mail.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440003",
        "cal",
        "https://calendar.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440004",
        "hr",
        "https://hr.example.com/portal",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440005",
        "status",
        "https://status.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440006",
        "ci",
        "https://ci.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440007",
        "repo",
        "https://git.example.com/",
    ),
    (
        "550e8400-e29b-41d4-a716-446655440008",
        "handbook",
        "https://handbook.example.com/",
    ),
];

/// Insert any seed entries whose ids are not yet present. Failures are
/// logged and swallowed.
pub async fn seed_system_entries(repository: &dyn Repository) {
    let mut inserted = 0usize;

    for (id_str, short_name, long_url) in SEED_ENTRIES {
        let id = match Uuid::parse_str(id_str) {
            Ok(id) => id,
            Err(e) => {
                warn!("Skipping seed entry '{}': bad id: {}", short_name, e);
                continue;
            }
        };

        if repository.get_by_id(id).await.is_some() {
            continue;
        }

        let entry = UrlEntry {
            id,
            short_name: short_name.to_string(),
            long_url: long_url.to_string(),
            created_by: SYSTEM_IDENTITY.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            updated_by: None,
            is_system_entry: true,
        };

        match repository.insert(entry).await {
            Ok(()) => inserted += 1,
            Err(e) => {
                warn!("Failed to seed entry '{}': {}", short_name, e);
            }
        }
    }

    if inserted > 0 {
        info!("Seeded {} system url entries", inserted);
    } else {
        info!("All seed entries already present");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::backends::memory::MemoryRepository;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let repository = MemoryRepository::new();

        seed_system_entries(&repository).await;
        let first = repository.load_all().await.len();
        assert_eq!(first, SEED_ENTRIES.len());

        seed_system_entries(&repository).await;
        assert_eq!(repository.load_all().await.len(), first);
    }

    #[tokio::test]
    async fn seeded_entries_belong_to_system() {
        let repository = MemoryRepository::new();
        seed_system_entries(&repository).await;

        for entry in repository.load_all().await {
            assert_eq!(entry.created_by, SYSTEM_IDENTITY);
            assert!(entry.is_system_entry);
            assert!(entry.updated_at.is_none());
        }
    }
}
