//! URL directory API handlers
//!
//! Every handler resolves the acting identity once, then delegates to the
//! directory service. Expected failures (validation, not-found, forbidden)
//! come back as `{error, message}` JSON bodies with matching status codes.

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::GoUrlsError;
use crate::services::{
    CreateUrlRequest, IdentityResolver, ReservedWords, UpdateUrlRequest, UrlDirectory,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub short_name: Option<String>,
}

/// Turn a service error into its HTTP shape
fn error_response(err: &GoUrlsError) -> HttpResponse {
    let body = serde_json::json!({
        "error": err.kind(),
        "message": err.message(),
    });

    match err {
        GoUrlsError::Validation(_)
        | GoUrlsError::ReservedShortName(_)
        | GoUrlsError::DuplicateShortName(_) => HttpResponse::BadRequest().json(body),
        GoUrlsError::NotFound(_) => HttpResponse::NotFound().json(body),
        GoUrlsError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        _ => {
            error!("URL API: internal error: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub struct UrlApi;

impl UrlApi {
    pub async fn get_all(
        req: HttpRequest,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);
        let entries = directory.list_all(&identity).await;

        info!("URL API: returning {} entries to '{}'", entries.len(), identity);
        HttpResponse::Ok().json(entries)
    }

    pub async fn search(
        req: HttpRequest,
        query: web::Query<SearchQuery>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);
        let fragment = query.short_name.as_deref().unwrap_or("");
        let entries = directory.search(&identity, fragment).await;

        info!(
            "URL API: search '{}' returned {} results",
            fragment,
            entries.len()
        );
        HttpResponse::Ok().json(entries)
    }

    pub async fn whoami(req: HttpRequest, resolver: web::Data<IdentityResolver>) -> impl Responder {
        let identity = resolver.resolve(&req);

        HttpResponse::Ok().json(serde_json::json!({
            "name": identity,
            "isAuthenticated": identity != "anonymous",
        }))
    }

    pub async fn reserved_words(reserved: web::Data<Arc<ReservedWords>>) -> impl Responder {
        HttpResponse::Ok().json(serde_json::json!({
            "reservedWords": reserved.words(),
        }))
    }

    pub async fn get_by_id(
        req: HttpRequest,
        id: web::Path<Uuid>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);

        match directory.get_by_id(&identity, id.into_inner()).await {
            Ok(entry) => HttpResponse::Ok().json(entry),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_by_short_name(
        req: HttpRequest,
        short_name: web::Path<String>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);

        match directory.get_by_short_name(&identity, &short_name).await {
            Ok(entry) => HttpResponse::Ok().json(entry),
            Err(e) => error_response(&e),
        }
    }

    pub async fn create(
        req: HttpRequest,
        payload: web::Json<CreateUrlRequest>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);
        info!(
            "URL API: create request from '{}' - shortName: {}",
            identity, payload.short_name
        );

        match directory.create(&identity, payload.into_inner()).await {
            Ok(entry) => HttpResponse::Ok().json(entry),
            Err(e) => error_response(&e),
        }
    }

    pub async fn update(
        req: HttpRequest,
        id: web::Path<Uuid>,
        payload: web::Json<UpdateUrlRequest>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);
        info!("URL API: update request from '{}' - id: {}", identity, id);

        match directory
            .update(&identity, id.into_inner(), payload.into_inner())
            .await
        {
            Ok(entry) => HttpResponse::Ok().json(entry),
            Err(e) => error_response(&e),
        }
    }

    pub async fn delete(
        req: HttpRequest,
        id: web::Path<Uuid>,
        directory: web::Data<UrlDirectory>,
        resolver: web::Data<IdentityResolver>,
    ) -> impl Responder {
        let identity = resolver.resolve(&req);
        info!("URL API: delete request from '{}' - id: {}", identity, id);

        match directory.delete(&identity, id.into_inner()).await {
            Ok(()) => HttpResponse::Ok().json(serde_json::json!({
                "message": "Url entry deleted successfully"
            })),
            Err(e) => error_response(&e),
        }
    }
}
