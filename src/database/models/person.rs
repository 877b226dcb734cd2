use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub age: i32,
}

/// Insert payload; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub gender: String,
    pub age: i32,
}
