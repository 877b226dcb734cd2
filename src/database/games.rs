use sqlx::PgPool;

use crate::database::models::game::{Game, NewGame};
use crate::database::DatabaseError;

/// Persistence operations for games. Same surface as [`PersonStore`];
/// every call commits independently.
///
/// [`PersonStore`]: crate::database::persons::PersonStore
pub struct GameStore {
    pool: PgPool,
}

impl GameStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new game and return the assigned id.
    pub async fn insert(&self, game: NewGame) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO games (title, release_date) VALUES ($1, $2) RETURNING id",
        )
        .bind(&game.title)
        .bind(game.release_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Persist all fields of an existing game.
    pub async fn update(&self, game: &Game) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE games SET title = $1, release_date = $2 WHERE id = $3")
            .bind(&game.title)
            .bind(game.release_date)
            .bind(game.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All games, ordered by id.
    pub async fn find_all(&self) -> Result<Vec<Game>, DatabaseError> {
        let games =
            sqlx::query_as::<_, Game>("SELECT id, title, release_date FROM games ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(games)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Game>, DatabaseError> {
        let game =
            sqlx::query_as::<_, Game>("SELECT id, title, release_date FROM games WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(game)
    }
}
