use axum::http::{header, Method, StatusCode};
use axum::routing::get;
use axum::{extract::State, response::IntoResponse, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod games;
pub mod persons;

/// Assemble the application router. Permission requirements live in the
/// handler signatures (see `middleware::auth`).
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Persons resource
        .route("/persons", get(persons::list).post(persons::create))
        .route(
            "/persons/:person_id",
            axum::routing::patch(persons::update).delete(persons::delete),
        )
        // Games resource
        .route("/games", get(games::list).post(games::create))
        .route(
            "/games/:game_id",
            axum::routing::patch(games::update).delete(games::delete),
        )
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Agency API",
            "version": version,
            "description": "Casting agency API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "persons": "/persons[/:id] (protected, read/create/edit/delete:persons)",
                "games": "/games[/:id] (protected, read/create/edit/delete:games)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
