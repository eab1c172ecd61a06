//! Service layer for business logic
//!
//! Resolution of the acting identity, the reserved-word gate, ownership
//! authorization, and the URL directory itself all live here, shared by the
//! HTTP handlers in `crate::api`.

mod directory;
mod health;
mod identity;
mod permissions;
mod redirect;
mod reserved;
mod seed;

pub use directory::{CreateUrlRequest, UpdateUrlRequest, UrlDirectory, UrlEntryDto};
pub use health::{AppStartTime, HealthService};
pub use identity::IdentityResolver;
pub use permissions::{SYSTEM_IDENTITY, can_modify};
pub use redirect::{RedirectOutcome, RedirectService};
pub use reserved::ReservedWords;
pub use seed::seed_system_entries;
