use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use std::sync::Arc;
use tracing::info;

use gourls::api::UrlApi;
use gourls::config::{get_config, init_config};
use gourls::errors::GoUrlsError;
use gourls::repository::{Repository, RepositoryFactory};
use gourls::services::{
    AppStartTime, HealthService, IdentityResolver, RedirectService, ReservedWords, UrlDirectory,
    seed_system_entries,
};
use gourls::system::logging::init_logging;

fn fail_startup(err: GoUrlsError) -> ! {
    eprintln!("{}", err.format_colored());
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    // Guard must stay alive for the lifetime of the process
    let _log_guard = init_logging(config);

    // Missing reserved words is the one intentional fatal startup condition
    let reserved = match ReservedWords::from_config(&config.reserved) {
        Ok(words) => Arc::new(words),
        Err(e) => fail_startup(e),
    };
    info!("Loaded {} reserved words", reserved.words().len());

    let repository: Arc<dyn Repository> = match RepositoryFactory::create(config).await {
        Ok(repository) => repository,
        Err(e) => fail_startup(e),
    };
    info!("Using repository backend: {}", repository.backend_name().await);

    // Best-effort: failures are logged inside and never abort startup
    seed_system_entries(repository.as_ref()).await;

    let directory = web::Data::new(UrlDirectory::new(repository.clone(), reserved.clone()));
    let resolver = web::Data::new(IdentityResolver::new(config.identity.default_user.clone()));
    let reserved_data = web::Data::new(reserved.clone());
    let repository_data = web::Data::new(repository.clone());
    let app_start_time_data = web::Data::new(app_start_time);

    let api_prefix = config.routes.api_prefix.clone();
    let health_prefix = config.routes.health_prefix.clone();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            // The original deployment fronts a separate SPA, so CORS is open
            .wrap(Cors::permissive())
            .app_data(directory.clone())
            .app_data(resolver.clone())
            .app_data(reserved_data.clone())
            .app_data(repository_data.clone())
            .app_data(app_start_time_data.clone())
            .service(
                web::scope(&api_prefix)
                    .route("", web::get().to(UrlApi::get_all))
                    .route("", web::post().to(UrlApi::create))
                    .route("/search", web::get().to(UrlApi::search))
                    .route("/user", web::get().to(UrlApi::whoami))
                    .route("/reserved-words", web::get().to(UrlApi::reserved_words))
                    .route("/id/{id}", web::get().to(UrlApi::get_by_id))
                    .route("/id/{id}", web::put().to(UrlApi::update))
                    .route("/id/{id}", web::delete().to(UrlApi::delete))
                    .route("/{short_name}", web::get().to(UrlApi::get_by_short_name)),
            )
            .service(
                web::scope(&health_prefix)
                    .route("", web::get().to(HealthService::health_check))
                    .route("/ready", web::get().to(HealthService::readiness_check))
                    .route("/live", web::get().to(HealthService::liveness_check)),
            )
            .route(
                "/{short_name}",
                web::get().to(RedirectService::handle_redirect),
            )
            .route(
                "/{short_name}",
                web::head().to(RedirectService::handle_redirect),
            )
    })
    .workers(config.server.cpu_count.clamp(1, 32))
    .bind(bind_address)?
    .run()
    .await
}
