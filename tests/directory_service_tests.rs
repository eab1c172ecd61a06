//! URL directory service tests
//!
//! Exercises the creation gates (reserved words, duplicate names), the
//! ownership rules on update/delete, and the audit-field behavior, all over
//! the in-memory repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use gourls::config::ReservedConfig;
use gourls::repository::backends::memory::MemoryRepository;
use gourls::repository::{Repository, UrlEntry};
use gourls::services::{CreateUrlRequest, ReservedWords, UpdateUrlRequest, UrlDirectory};

fn reserved(words: &[&str]) -> ReservedWords {
    ReservedWords::from_config(&ReservedConfig {
        words: words.iter().map(|w| w.to_string()).collect(),
    })
    .expect("test word list must not be empty")
}

fn directory() -> (UrlDirectory, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::new());
    let gate = Arc::new(reserved(&["admin", "api"]));
    (UrlDirectory::new(repository.clone(), gate), repository)
}

fn create_req(short_name: &str, long_url: &str) -> CreateUrlRequest {
    CreateUrlRequest {
        short_name: short_name.to_string(),
        long_url: long_url.to_string(),
    }
}

fn update_req(short_name: &str, long_url: &str) -> UpdateUrlRequest {
    UpdateUrlRequest {
        short_name: short_name.to_string(),
        long_url: long_url.to_string(),
    }
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let (directory, _) = directory();

    let created = directory
        .create("alice", create_req("abc", "http://x"))
        .await
        .expect("create should succeed");

    assert_eq!(created.short_name, "abc");
    assert_eq!(created.created_by, "alice");
    assert!(created.updated_at.is_none());
    assert!(created.updated_by.is_none());
    assert!(!created.is_system_entry);
    assert!(created.can_edit);
    assert!(created.can_delete);

    let fetched = directory
        .get_by_short_name("alice", "abc")
        .await
        .expect("entry should exist");
    assert_eq!(fetched.long_url, "http://x");
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn reserved_word_is_rejected_without_persisting() {
    let (directory, repository) = directory();

    let err = directory
        .create("alice", create_req("admin", "http://x"))
        .await
        .expect_err("reserved word must be rejected");

    assert_eq!(err.kind(), "reserved");
    assert!(repository.load_all().await.is_empty());
}

#[tokio::test]
async fn reserved_check_is_case_insensitive() {
    let (directory, _) = directory();

    let err = directory
        .create("alice", create_req("  ADMIN  ", "http://x"))
        .await
        .expect_err("reserved word must be rejected regardless of case");
    assert_eq!(err.kind(), "reserved");
}

#[tokio::test]
async fn duplicate_short_name_is_rejected_case_insensitively() {
    let (directory, repository) = directory();

    directory
        .create("alice", create_req("go", "http://go.dev"))
        .await
        .expect("first create should succeed");

    let err = directory
        .create("bob", create_req("GO", "http://other.com"))
        .await
        .expect_err("case-insensitive duplicate must be rejected");

    assert_eq!(err.kind(), "duplicate");
    assert_eq!(repository.load_all().await.len(), 1);
}

#[tokio::test]
async fn empty_short_name_is_a_validation_error() {
    let (directory, _) = directory();

    let err = directory
        .create("alice", create_req("   ", "http://x"))
        .await
        .expect_err("blank short name must be rejected");
    assert_eq!(err.kind(), "validation");
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let (directory, _) = directory();

    let created = directory
        .create("bob", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let err = directory
        .update("alice", created.id, update_req("go2", "http://go.dev"))
        .await
        .expect_err("non-owner must not update");

    assert_eq!(err.kind(), "forbidden");
}

#[tokio::test]
async fn update_sets_audit_fields_and_preserves_creation_data() {
    let (directory, _) = directory();

    let created = directory
        .create("alice", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let updated = directory
        .update("alice", created.id, update_req("golang", "http://go.dev/doc"))
        .await
        .expect("owner update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.short_name, "golang");
    assert_eq!(updated.long_url, "http://go.dev/doc");
    assert_eq!(updated.created_by, "alice");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_by.as_deref(), Some("alice"));
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn rename_to_reserved_word_is_rejected() {
    let (directory, _) = directory();

    let created = directory
        .create("alice", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let err = directory
        .update("alice", created.id, update_req("api", "http://go.dev"))
        .await
        .expect_err("rename onto a reserved word must fail");
    assert_eq!(err.kind(), "reserved");
}

#[tokio::test]
async fn rename_to_existing_name_is_rejected() {
    let (directory, _) = directory();

    directory
        .create("alice", create_req("docs", "http://docs"))
        .await
        .unwrap();
    let created = directory
        .create("alice", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let err = directory
        .update("alice", created.id, update_req("Docs", "http://go.dev"))
        .await
        .expect_err("rename onto an existing name must fail");
    assert_eq!(err.kind(), "duplicate");
}

#[tokio::test]
async fn changing_only_case_of_own_name_is_allowed() {
    let (directory, _) = directory();

    let created = directory
        .create("alice", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    // Same normalized name, so neither gate applies
    let updated = directory
        .update("alice", created.id, update_req("Go", "http://go.dev"))
        .await
        .expect("case-only rename of own entry should succeed");
    assert_eq!(updated.short_name, "Go");
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found_never_forbidden() {
    let (directory, _) = directory();

    let err = directory
        .delete("alice", Uuid::new_v4())
        .await
        .expect_err("unknown id must be not-found");
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let (directory, repository) = directory();

    let created = directory
        .create("bob", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let err = directory
        .delete("alice", created.id)
        .await
        .expect_err("non-owner must not delete");
    assert_eq!(err.kind(), "forbidden");
    assert_eq!(repository.load_all().await.len(), 1);
}

#[tokio::test]
async fn system_identity_can_modify_system_entries() {
    let (directory, repository) = directory();

    let entry = UrlEntry {
        id: Uuid::new_v4(),
        short_name: "wiki".to_string(),
        long_url: "https://wiki.example.com/".to_string(),
        created_by: "system".to_string(),
        created_at: Utc::now(),
        updated_at: None,
        updated_by: None,
        is_system_entry: true,
    };
    repository.insert(entry.clone()).await.unwrap();

    let err = directory
        .update("alice", entry.id, update_req("wiki", "https://evil.example/"))
        .await
        .expect_err("regular users must not touch system entries");
    assert_eq!(err.kind(), "forbidden");

    directory
        .update("system", entry.id, update_req("wiki", "https://wiki2.example.com/"))
        .await
        .expect("system identity may update system entries");
}

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
    let (directory, _) = directory();

    directory
        .create("alice", create_req("payroll", "http://pay"))
        .await
        .unwrap();
    directory
        .create("alice", create_req("MyPage", "http://page"))
        .await
        .unwrap();
    directory
        .create("alice", create_req("docs", "http://docs"))
        .await
        .unwrap();

    let hits = directory.search("alice", "PA").await;
    assert_eq!(hits.len(), 2);

    let all = directory.search("alice", "").await;
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn annotations_reflect_the_acting_identity() {
    let (directory, _) = directory();

    directory
        .create("bob", create_req("go", "http://go.dev"))
        .await
        .unwrap();

    let as_bob = directory.list_all("bob").await;
    assert!(as_bob[0].can_edit && as_bob[0].can_delete);

    let as_alice = directory.list_all("alice").await;
    assert!(!as_alice[0].can_edit && !as_alice[0].can_delete);

    let as_system = directory.list_all("system").await;
    assert!(as_system[0].can_edit && as_system[0].can_delete);
}
