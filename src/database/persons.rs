use sqlx::PgPool;

use crate::database::models::person::{NewPerson, Person};
use crate::database::DatabaseError;

/// Persistence operations for persons. Every call commits independently;
/// no operation spans multiple entities.
pub struct PersonStore {
    pool: PgPool,
}

impl PersonStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new person and return the assigned id.
    pub async fn insert(&self, person: NewPerson) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO persons (name, gender, age) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&person.name)
        .bind(&person.gender)
        .bind(person.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Persist all fields of an existing person.
    pub async fn update(&self, person: &Person) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE persons SET name = $1, gender = $2, age = $3 WHERE id = $4")
            .bind(&person.name)
            .bind(&person.gender)
            .bind(person.age)
            .bind(person.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All persons, ordered by id.
    pub async fn find_all(&self) -> Result<Vec<Person>, DatabaseError> {
        let persons =
            sqlx::query_as::<_, Person>("SELECT id, name, gender, age FROM persons ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(persons)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Person>, DatabaseError> {
        let person = sqlx::query_as::<_, Person>(
            "SELECT id, name, gender, age FROM persons WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }
}
