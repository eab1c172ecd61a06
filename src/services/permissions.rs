//! Ownership authorization
//!
//! A single total rule decides whether an identity may edit or delete an
//! entry. The same rule governs both, so callers surface it as two equal
//! `can_edit` / `can_delete` flags.

use crate::repository::UrlEntry;

/// The superuser identity; also the `created_by` of seeded entries
pub const SYSTEM_IDENTITY: &str = "system";

/// Returns whether `identity` may modify (edit or delete) `entry`.
///
/// System entries are locked to everyone except the system identity; the
/// system identity may touch anything; everyone else only their own entries.
pub fn can_modify(identity: &str, entry: &UrlEntry) -> bool {
    if entry.is_system_entry && identity != SYSTEM_IDENTITY {
        return false;
    }

    if identity == SYSTEM_IDENTITY {
        return true;
    }

    entry.created_by.eq_ignore_ascii_case(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(created_by: &str, is_system_entry: bool) -> UrlEntry {
        UrlEntry {
            id: Uuid::new_v4(),
            short_name: "go".to_string(),
            long_url: "https://go.dev".to_string(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            updated_by: None,
            is_system_entry,
        }
    }

    #[test]
    fn system_identity_can_modify_anything() {
        assert!(can_modify("system", &entry("alice", false)));
        assert!(can_modify("system", &entry("system", true)));
        assert!(can_modify("system", &entry("bob", true)));
    }

    #[test]
    fn system_entries_are_locked_to_regular_users() {
        assert!(!can_modify("alice", &entry("alice", true)));
        assert!(!can_modify("bob", &entry("system", true)));
    }

    #[test]
    fn owners_can_modify_their_own_entries() {
        assert!(can_modify("alice", &entry("alice", false)));
        assert!(can_modify("alice", &entry("ALICE", false)));
        assert!(!can_modify("alice", &entry("bob", false)));
    }
}
