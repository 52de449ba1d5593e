pub mod api;
mod config;
mod direction;
mod locomotive;
mod media;
mod timetable;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use timetable::AllocationStore;

#[derive(OpenApi)]
#[openapi(
    info(title = "Trackside Categorization API", version = "0.2.0"),
    paths(
        api::categorize::list_pending,
        api::categorize::get_train_info,
        api::categorize::list_suggestions,
        api::health::health_check,
    ),
    components(schemas(
        api::categorize::PendingListResponse,
        api::categorize::TrainInformation,
        api::categorize::SuggestionListResponse,
        api::health::HealthResponse,
        api::ErrorResponse,
        timetable::Train,
        timetable::HourMinute,
        timetable::ServiceInformation,
        locomotive::Locomotive,
        locomotive::LocomotiveCategory,
        direction::Direction,
    )),
    tags(
        (name = "categorize", description = "Clip categorization support endpoints"),
        (name = "health", description = "Service health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info,sqlx=warn".into()),
        )
        .init();

    // Load config
    let config = Config::load("config.yaml").expect("Failed to load config");
    tracing::info!(
        schedule_dir = %config.data.schedule_dir.display(),
        archive_dir = %config.data.video_archive_dir.display(),
        "Loaded configuration"
    );

    // Build CORS layer based on config
    let cors_layer = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode explicitly enabled (all origins allowed) - DO NOT USE IN PRODUCTION");
        CorsLayer::permissive()
    } else if !config.cors_origins.is_empty() {
        tracing::info!(origins = ?config.cors_origins, "CORS: Restricting to configured origins");
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        panic!("CORS configuration error: Either set 'cors_origins' with allowed origins, or set 'cors_permissive: true' for development");
    };

    // Initialize SQLite database
    let cwd = std::env::current_dir().expect("Failed to get current directory");
    tracing::info!("Current working directory: {}", cwd.display());
    let db_path = cwd.join("database");
    if let Err(e) = std::fs::create_dir_all(&db_path) {
        tracing::warn!("Could not create database directory: {}", e);
    }
    let db_file = db_path.join("data.db");
    tracing::info!("Database path: {}, exists: {}", db_file.display(), db_file.exists());
    let db_url = format!("sqlite:{}?mode=rwc", db_file.display());
    let pool = SqlitePool::connect(&db_url)
        .await
        .expect("Failed to connect to SQLite database");

    // Run migrations
    let migrator = sqlx::migrate!("./migrations");
    tracing::info!(migrations = migrator.migrations.len(), "Found migrations");
    migrator
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    // Load timetable periods into memory
    let periods = timetable::load_timetables(&config.data.schedule_dir)
        .expect("Failed to load timetables");
    tracing::info!(
        periods = periods.len(),
        trains = periods.iter().map(|p| p.trains.len()).sum::<usize>(),
        "Loaded timetables"
    );
    let timetables = Arc::new(periods);

    // Allocation plans load lazily, one file per day
    let allocations = Arc::new(AllocationStore::new(config.data.allocation_dir.clone()));

    // Build the app
    let app = Router::new()
        .route("/", get(root))
        .nest(
            "/api",
            api::router(
                pool.clone(),
                timetables,
                allocations,
                config.data.video_archive_dir.clone(),
            ),
        )
        .nest(
            "/cdn",
            media::router(
                config.data.video_archive_dir.clone(),
                config.data.thumbnail_cache_dir.clone(),
            ),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("Failed to bind listen address");

    tracing::info!("Server running on http://{}", config.bind_address);
    tracing::info!("Swagger UI: http://{}/swagger-ui", config.bind_address);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

async fn root() -> &'static str {
    "Trackside Categorization API"
}
