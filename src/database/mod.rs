use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod games;
pub mod models;
pub mod persons;

pub use games::GameStore;
pub use persons::PersonStore;

use models::performance::Performance;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Explicitly constructed storage handle. Built once in main and carried in
/// application state; every handler acquires connections through its pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using DATABASE_URL and the configured pool settings.
    pub async fn connect() -> Result<Self, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::Connection("DATABASE_URL is not set".to_string()))?;

        let settings = &crate::config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .connect(&url)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        info!("Created database pool (max {})", settings.max_connections);
        Ok(Self { pool })
    }

    pub fn persons(&self) -> PersonStore {
        PersonStore::new(self.pool.clone())
    }

    pub fn games(&self) -> GameStore {
        GameStore::new(self.pool.clone())
    }

    /// Create the schema if it does not exist yet. Idempotent; runs at boot.
    ///
    /// Performance rows are dropped together with the person or game they
    /// reference: the association has no endpoint of its own, so a restrict
    /// policy would make deletions fail on rows no client can see or remove.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS persons (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                gender TEXT NOT NULL DEFAULT 'Other',
                age INTEGER NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                release_date DATE NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS performances (
                game_id BIGINT NOT NULL REFERENCES games(id) ON DELETE CASCADE,
                person_id BIGINT NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
                fee DOUBLE PRECISION NOT NULL DEFAULT 0
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        }

        info!("Database schema is up to date");
        Ok(())
    }

    /// Insert a demo person, game and performance booking. Only called when
    /// DB_SEED_DEMO is set; useful for a fresh development database.
    pub async fn seed_demo(&self) -> Result<(), DatabaseError> {
        let person_id = self
            .persons()
            .insert(models::person::NewPerson {
                name: "Matthew".to_string(),
                gender: "Male".to_string(),
                age: 25,
            })
            .await?;

        let game_id = self
            .games()
            .insert(models::game::NewGame {
                title: "Matthew first Game".to_string(),
                release_date: chrono::Utc::now().date_naive(),
            })
            .await?;

        let booking = Performance {
            game_id,
            person_id,
            fee: 500.0,
        };
        sqlx::query("INSERT INTO performances (game_id, person_id, fee) VALUES ($1, $2, $3)")
            .bind(booking.game_id)
            .bind(booking.person_id)
            .bind(booking.fee)
            .execute(&self.pool)
            .await?;

        info!("Seeded demo records");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
