use agency_api::auth::TokenVerifier;
use agency_api::database::Database;
use agency_api::handlers;
use agency_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_ISSUER, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = agency_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Agency API in {:?} mode", config.environment);

    let db = Database::connect()
        .await
        .unwrap_or_else(|e| panic!("database setup failed: {}", e));

    db.migrate()
        .await
        .unwrap_or_else(|e| panic!("schema migration failed: {}", e));

    if config.database.seed_demo {
        db.seed_demo()
            .await
            .unwrap_or_else(|e| panic!("demo seed failed: {}", e));
    }

    let verifier = TokenVerifier::new(&config.auth)
        .unwrap_or_else(|e| panic!("token verifier setup failed: {}", e));

    let app = handlers::app(AppState { db, verifier });

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Agency API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
