//! Libris Server - Library Circulation System
//!
//! A Rust REST API server for tracking catalog stock and loans.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing: console plus the log file the system always kept
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    let file_appender =
        tracing_appender::rolling::never(&config.logging.directory, &config.logging.filename);
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the snapshot stores
    let repository = Repository::open(&config.storage.data_dir)?;
    tracing::info!("Opened data directory {}", config.storage.data_dir);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services and seed the administrator account on first start
    let services = Services::new(repository);
    if config.users.bootstrap_admin {
        services
            .identity
            .bootstrap_admin(&config.users.admin_username, &config.users.admin_password)?;
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication and accounts
        .route("/auth/login", post(api::auth::login))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/password", put(api::auth::change_password))
        .route("/auth/profile", put(api::auth::update_profile))
        // Items (catalog)
        .route("/items", get(api::items::list_items))
        .route("/items", post(api::items::create_item))
        .route("/items/export", get(api::items::export_items))
        .route("/items/:id", get(api::items::get_item))
        .route("/items/:id", put(api::items::update_item))
        .route("/items/:id", delete(api::items::delete_item))
        // Loans (circulation)
        .route("/loans", post(api::loans::check_out))
        .route("/loans/return", post(api::loans::check_in))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/:username", get(api::users::get_user))
        .route("/users/:username", delete(api::users::delete_user))
        .route("/users/:username/loans", get(api::users::get_user_loans))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
