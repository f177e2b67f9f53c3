//! # Workouts
//!
//! REST API over a single workout resource (title, load, reps), backed by
//! MongoDB.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/workouts` | all workouts, newest first |
//! | GET | `/api/workouts/{id}` | one workout |
//! | POST | `/api/workouts` | create |
//! | DELETE | `/api/workouts/{id}` | delete |
//! | PATCH | `/api/workouts/{id}` | partial update |
//!
//! Bodies are JSON. Errors come back as `{"error": ...}`, with an extra
//! `emptyFields` array when creation validation fails.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::Response,
    routing::get,
};

use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{SignalKind, signal},
    },
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    create_workout_handler, delete_workout_handler, get_workout_handler, list_workouts_handler,
    update_workout_handler, welcome_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    info!("Connecting to MongoDB...");
    let state = AppState::new(&config).await;

    info!("Starting server...");
    let app = build_router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

/// Builds the route table once at startup; nothing registers routes after
/// this returns.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(welcome_handler))
        .route(
            "/api/workouts",
            get(list_workouts_handler).post(create_workout_handler),
        )
        .route(
            "/api/workouts/{id}",
            get(get_workout_handler)
                .delete(delete_workout_handler)
                .patch(update_workout_handler),
        )
        .layer(cors)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.uri().path(), request.method());

    next.run(request).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
