//! SQLite-backed repository tests
//!
//! The SQL backends rely on the unique index over the normalized short name
//! to reject duplicates, including writes that race past the service-layer
//! pre-check. These tests run against a real SQLite file so the index and
//! the error mapping are exercised end to end.

use chrono::Utc;
use uuid::Uuid;

use gourls::errors::GoUrlsError;
use gourls::repository::backends::sea_orm::SeaOrmRepository;
use gourls::repository::{Repository, UrlEntry};

fn entry(short_name: &str, long_url: &str) -> UrlEntry {
    UrlEntry {
        id: Uuid::new_v4(),
        short_name: short_name.to_string(),
        long_url: long_url.to_string(),
        created_by: "alice".to_string(),
        created_at: Utc::now(),
        updated_at: None,
        updated_by: None,
        is_system_entry: false,
    }
}

async fn sqlite_repository(dir: &tempfile::TempDir) -> SeaOrmRepository {
    let url = format!("sqlite://{}/urls.db?mode=rwc", dir.path().display());
    SeaOrmRepository::new(&url, "sqlite")
        .await
        .expect("sqlite repository should initialize and migrate")
}

#[tokio::test]
async fn unique_index_rejects_case_variant_insert() {
    let dir = tempfile::tempdir().unwrap();
    let repository = sqlite_repository(&dir).await;

    repository
        .insert(entry("Go", "https://go.dev"))
        .await
        .unwrap();

    let err = repository
        .insert(entry("  gO ", "https://golang.org"))
        .await
        .expect_err("case-variant duplicate must hit the unique index");
    assert!(matches!(err, GoUrlsError::DuplicateShortName(_)));
    assert_eq!(repository.load_all().await.len(), 1);
}

#[tokio::test]
async fn unique_index_rejects_rename_onto_existing_name() {
    let dir = tempfile::tempdir().unwrap();
    let repository = sqlite_repository(&dir).await;

    repository
        .insert(entry("go", "https://go.dev"))
        .await
        .unwrap();
    let other = entry("docs", "https://docs.example.com");
    repository.insert(other.clone()).await.unwrap();

    let mut renamed = other;
    renamed.short_name = "GO".to_string();

    let err = repository
        .update(renamed)
        .await
        .expect_err("rename onto a taken name must hit the unique index");
    assert!(matches!(err, GoUrlsError::DuplicateShortName(_)));
}

#[tokio::test]
async fn lookups_distinguish_exact_and_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let repository = sqlite_repository(&dir).await;

    repository
        .insert(entry("MyPage", "https://pages.example.com/my"))
        .await
        .unwrap();

    assert!(repository.get_by_short_name("MyPage").await.is_some());
    assert!(repository.get_by_short_name("mypage").await.is_none());
    assert!(repository.get_by_normalized("mypage").await.is_some());
}

#[tokio::test]
async fn search_treats_like_metacharacters_literally() {
    let dir = tempfile::tempdir().unwrap();
    let repository = sqlite_repository(&dir).await;

    repository
        .insert(entry("my_page", "https://pages.example.com/my"))
        .await
        .unwrap();
    repository
        .insert(entry("mypage", "https://pages.example.com/other"))
        .await
        .unwrap();
    repository
        .insert(entry("pct%off", "https://deals.example.com"))
        .await
        .unwrap();

    // "_" must not act as a single-character wildcard
    let underscore = repository.search("my_").await;
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].short_name, "my_page");

    // "%" must not act as a multi-character wildcard
    let percent = repository.search("%").await;
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].short_name, "pct%off");

    // plain fragments still match as substrings
    assert_eq!(repository.search("page").await.len(), 2);
    assert_eq!(repository.search("").await.len(), 3);
}
