use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use configuration::Config;
use database::DbRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// The main function to configure and run the web server.
///
/// Connects to the database, applies migrations, and serves the journal API
/// until the process is stopped. Tracing is expected to be initialized by
/// the calling binary.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app_state = Arc::new(AppState { db_repo });

    // The dashboard is a static site on another origin, so CORS stays open;
    // per-user scoping is enforced by the auth header, not the origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard-stats", get(handlers::get_dashboard_stats))
        .route(
            "/api/trades",
            get(handlers::list_trades).post(handlers::create_trade),
        )
        .route("/api/trades/export", get(handlers::export_trades))
        .route(
            "/api/trades/:trade_id",
            get(handlers::get_trade)
                .put(handlers::update_trade)
                .delete(handlers::delete_trade),
        )
        .route(
            "/api/psychology",
            get(handlers::list_psychology_entries).post(handlers::create_psychology_entry),
        )
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/api/goals/:goal_id", put(handlers::update_goal))
        .with_state(app_state)
        .layer(cors)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 2));

    let addr: SocketAddr = format!(
        "{}:{}",
        config.application.host, config.application.port
    )
    .parse()?;
    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
