use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, trace};

use crate::repository::Repository;

/// Application start time, recorded once in main
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    /// Full health report: probes the repository with a 5s budget and
    /// reports uptime alongside the backend name.
    pub async fn health_check(
        repository: web::Data<Arc<dyn Repository>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        let probe = tokio::time::timeout(Duration::from_secs(5), repository.load_all()).await;
        let backend = repository.backend_name().await;

        let (healthy, repository_check) = match probe {
            Ok(entries) => (
                true,
                json!({
                    "status": "healthy",
                    "entries_count": entries.len(),
                    "backend": backend,
                }),
            ),
            Err(_) => {
                error!("Repository health probe timed out");
                (
                    false,
                    json!({
                        "status": "unhealthy",
                        "error": "timeout",
                        "backend": backend,
                    }),
                )
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0);

        let body = json!({
            "status": if healthy { "healthy" } else { "unhealthy" },
            "timestamp": now.to_rfc3339(),
            "uptime": uptime_seconds,
            "checks": { "repository": repository_check },
        });

        if healthy {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }

    // Plain 200, for load balancers
    pub async fn readiness_check() -> impl Responder {
        HttpResponse::Ok().body("OK")
    }

    pub async fn liveness_check() -> impl Responder {
        HttpResponse::NoContent().finish()
    }
}
