//! Redirect resolution
//!
//! The visitor-facing path: a short name either 307s to its long URL or
//! routes the visitor to the creation flow with the name pre-filled. An
//! unknown name is deliberately not a 404.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::repository::{Repository, normalize_short_name};

/// Where the creation flow lives; the requested name is passed along
const CREATE_PATH: &str = "/create";

/// Outcome of resolving a short name for redirect purposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// The entry exists; redirect to its long URL
    Redirect(String),
    /// No such entry; send the visitor to the creation flow carrying the
    /// requested name
    NeedsCreation(String),
}

pub struct RedirectService;

impl RedirectService {
    /// Resolve a short name. Lookup matches on the normalized name, the
    /// same form the uniqueness rule uses.
    pub async fn resolve(repository: &dyn Repository, short_name: &str) -> RedirectOutcome {
        let normalized = normalize_short_name(short_name);

        match repository.get_by_normalized(&normalized).await {
            Some(entry) => RedirectOutcome::Redirect(entry.long_url),
            None => RedirectOutcome::NeedsCreation(short_name.trim().to_string()),
        }
    }

    pub async fn handle_redirect(
        path: web::Path<String>,
        repository: web::Data<Arc<dyn Repository>>,
    ) -> impl Responder {
        let short_name = path.into_inner();

        match Self::resolve(repository.get_ref().as_ref(), &short_name).await {
            RedirectOutcome::Redirect(target) => {
                debug!("Redirecting '{}' -> '{}'", short_name, target);
                HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                    .insert_header(("Location", target))
                    .finish()
            }
            RedirectOutcome::NeedsCreation(requested) => {
                debug!("No entry for '{}', routing to creation flow", requested);
                let create_url = format!(
                    "{}?shortName={}&available=true",
                    CREATE_PATH,
                    urlencoding::encode(&requested)
                );
                HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                    .insert_header(("Location", create_url))
                    .finish()
            }
        }
    }
}
