use axum::{
    routing::{get, post},
    Router,
};
use hrms_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/ws", get(routes::live::ws_handler));

    let authed_api = Router::new()
        .route(
            "/api/dashboard-stats",
            get(routes::dashboard::get_dashboard_stats),
        )
        .route(
            "/recruiter/dashboard/data",
            get(routes::recruiter_dashboard::get_self_dashboard_data),
        )
        .route(
            "/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/candidates/export",
            post(routes::export::export_candidates),
        )
        .route(
            "/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .put(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .layer(axum::middleware::from_fn(auth::require_auth))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.api_rps),
            rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/admin/dashboard/data",
            get(routes::admin_dashboard::get_admin_data),
        )
        .route(
            "/admin/dashboard/recruiter/:id/data",
            get(routes::admin_dashboard::get_recruiter_performance_data),
        )
        .route(
            "/admin/recruiters",
            get(routes::admin_dashboard::list_recruiters),
        )
        .layer(axum::middleware::from_fn(auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.api_rps),
            rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(authed_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
