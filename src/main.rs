use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use linkwork_match::auth::TokenVerifier;
use linkwork_match::config::{LoggingSettings, Settings, StoreBackend};
use linkwork_match::core::{Matcher, Recommender};
use linkwork_match::error::{handle_json_payload_error, handle_query_payload_error};
use linkwork_match::routes::{self, AppState};
use linkwork_match::services::{
    AppwriteCollections, AppwriteStore, InMemoryStore, PostingStore, ProfileStore,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io_error(format!("Configuration error: {}", e))
    })?;

    init_logging(&settings.logging);

    info!("Starting LinkWork matching service...");

    // Build the stores the recommender reads from
    let (profiles, postings): (Arc<dyn ProfileStore>, Arc<dyn PostingStore>) =
        match (settings.store.backend, settings.appwrite.clone()) {
            (StoreBackend::Appwrite, Some(appwrite)) => {
                let collections = AppwriteCollections {
                    users: settings.collection.users.clone(),
                    jobs: settings.collection.jobs.clone(),
                    gigs: settings.collection.gigs.clone(),
                };

                let store = Arc::new(
                    AppwriteStore::new(
                        appwrite.endpoint,
                        appwrite.api_key,
                        appwrite.project_id,
                        appwrite.database_id,
                        collections,
                    )
                    .map_err(|e| {
                        error!("Failed to create Appwrite client: {}", e);
                        io_error(format!("Appwrite client error: {}", e))
                    })?,
                );

                info!("Appwrite store initialized");
                (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn PostingStore>)
            }
            (StoreBackend::Appwrite, None) => {
                return Err(io_error("Appwrite backend selected without settings".to_string()));
            }
            (StoreBackend::Memory, _) => {
                warn!("Using in-memory store; data is not persisted");
                let store = match &settings.store.seed_path {
                    Some(path) => InMemoryStore::from_seed_file(path).map_err(|e| {
                        error!("Failed to seed in-memory store: {}", e);
                        io_error(format!("Seed error: {}", e))
                    })?,
                    None => {
                        warn!("No store.seed_path configured; the in-memory store starts empty");
                        InMemoryStore::new()
                    }
                };
                let store = Arc::new(store);
                (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn PostingStore>)
            }
        };

    // Initialize matcher with configured weights
    let weights = settings
        .scoring
        .weights
        .to_weights()
        .map_err(|e| io_error(format!("Configuration error: {}", e)))?;

    let matcher = Matcher::new(weights, settings.matching.max_distance_km);

    let recommender = Recommender::new(profiles, postings, matcher)
        .with_page_size(settings.matching.page_size)
        .with_gigs(settings.matching.include_gigs);

    info!(
        "Recommender initialized with weights: {:?}, radius: {}km, page size: {}",
        recommender.matcher().weights(),
        recommender.matcher().max_distance_km(),
        recommender.page_size()
    );

    // Build application state
    let app_state = AppState {
        recommender,
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };
    let verifier = TokenVerifier::new(&settings.auth.secret_key);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origins = settings.server.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = if allowed_origins.is_empty() {
            Cors::permissive()
        } else {
            allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        };

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
