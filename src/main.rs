use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpServer};
use matchmate_algo::config::Settings;
use matchmate_algo::core::Ranker;
use matchmate_algo::error::AppError;
use matchmate_algo::routes::{self, AppState};
use matchmate_algo::services::{PostgresClient, ProfileCache, ProfileStoreClient};
use matchmate_algo::session::SessionVerifier;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    AppError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle path extraction errors
fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid path: {}", err)).into()
}

fn startup_error(what: &str, err: impl std::fmt::Display) -> io::Error {
    error!("Failed to initialize {}: {}", what, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // LOG_LEVEL / LOG_FORMAT override the [logging] section
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(logging.level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(logging.format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting MatchMate matching service...");

    let settings = settings.map_err(|e| startup_error("configuration", e))?;

    info!("Configuration loaded successfully");

    let store = Arc::new(
        ProfileStoreClient::new(
            settings.store.endpoint.clone(),
            settings.store.api_key.clone(),
            settings.store.profiles_table.clone(),
            Duration::from_secs(settings.store.timeout_secs),
        )
        .map_err(|e| startup_error("profile store client", e))?,
    );

    info!("Profile store client initialized (table: {})", settings.store.profiles_table);

    // The cache is optional, the service runs against the store alone without it
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(120);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match &settings.cache.redis_url {
        Some(url) => match ProfileCache::connect(url, l1_cache_size, cache_ttl).await {
            Ok(c) => {
                info!("Profile cache initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
                Some(Arc::new(c))
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), running without cache", e);
                None
            }
        },
        None => {
            info!("No redis_url configured, running without cache");
            None
        }
    };

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| startup_error("PostgreSQL", e))?,
    );

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let ranker = Ranker::new(settings.scoring);

    info!("Ranker initialized with rules: {:?}", ranker.rules());

    if settings.auth.jwt_secret.is_empty() {
        return Err(startup_error("session verifier", "auth.jwt_secret is empty"));
    }
    let verifier = web::Data::new(SessionVerifier::new(
        &settings.auth.jwt_secret,
        settings.auth.audience.as_deref(),
    ));

    let app_state = AppState {
        store,
        cache,
        postgres,
        ranker,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(verifier.clone())
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
