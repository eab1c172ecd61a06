//! Repository backend tests
//!
//! The in-memory backend has to enforce the same normalized-name uniqueness
//! the SQL backends get from their unique index, since the service layer
//! treats the store as the source of truth for that invariant.

use chrono::Utc;
use uuid::Uuid;

use gourls::errors::GoUrlsError;
use gourls::repository::backends::memory::MemoryRepository;
use gourls::repository::{Repository, UrlEntry};

fn entry(short_name: &str) -> UrlEntry {
    UrlEntry {
        id: Uuid::new_v4(),
        short_name: short_name.to_string(),
        long_url: "https://x.example".to_string(),
        created_by: "alice".to_string(),
        created_at: Utc::now(),
        updated_at: None,
        updated_by: None,
        is_system_entry: false,
    }
}

#[tokio::test]
async fn insert_rejects_normalized_duplicates() {
    let repository = MemoryRepository::new();
    repository.insert(entry("go")).await.unwrap();

    let err = repository
        .insert(entry("  GO "))
        .await
        .expect_err("normalized duplicate must be rejected");
    assert!(matches!(err, GoUrlsError::DuplicateShortName(_)));
    assert_eq!(repository.load_all().await.len(), 1);
}

#[tokio::test]
async fn update_rejects_collision_with_another_entry() {
    let repository = MemoryRepository::new();
    let first = entry("go");
    let second = entry("docs");
    repository.insert(first.clone()).await.unwrap();
    repository.insert(second.clone()).await.unwrap();

    let mut renamed = second.clone();
    renamed.short_name = "Go".to_string();

    let err = repository
        .update(renamed)
        .await
        .expect_err("rename onto an existing name must be rejected");
    assert!(matches!(err, GoUrlsError::DuplicateShortName(_)));
}

#[tokio::test]
async fn update_allows_keeping_own_name() {
    let repository = MemoryRepository::new();
    let original = entry("go");
    repository.insert(original.clone()).await.unwrap();

    let mut changed = original.clone();
    changed.long_url = "https://go.dev/doc".to_string();
    repository.update(changed).await.unwrap();

    let fetched = repository.get_by_id(original.id).await.unwrap();
    assert_eq!(fetched.long_url, "https://go.dev/doc");
}

#[tokio::test]
async fn update_of_missing_entry_is_not_found() {
    let repository = MemoryRepository::new();

    let err = repository
        .update(entry("ghost"))
        .await
        .expect_err("updating a missing entry must fail");
    assert!(matches!(err, GoUrlsError::NotFound(_)));
}

#[tokio::test]
async fn remove_of_missing_entry_is_not_found() {
    let repository = MemoryRepository::new();

    let err = repository
        .remove(Uuid::new_v4())
        .await
        .expect_err("removing a missing entry must fail");
    assert!(matches!(err, GoUrlsError::NotFound(_)));
}

#[tokio::test]
async fn lookups_distinguish_exact_and_normalized() {
    let repository = MemoryRepository::new();
    repository.insert(entry("MyPage")).await.unwrap();

    assert!(repository.get_by_short_name("MyPage").await.is_some());
    assert!(repository.get_by_short_name("mypage").await.is_none());
    assert!(repository.get_by_normalized("mypage").await.is_some());
}

#[tokio::test]
async fn uniqueness_invariant_holds_across_all_entries() {
    let repository = MemoryRepository::new();
    for name in ["go", "docs", "wiki", " Go ", "DOCS"] {
        let _ = repository.insert(entry(name)).await;
    }

    let all = repository.load_all().await;
    let mut seen = std::collections::HashSet::new();
    for entry in &all {
        assert!(
            seen.insert(entry.normalized_name()),
            "duplicate normalized name in store"
        );
    }
    assert_eq!(all.len(), 3);
}
