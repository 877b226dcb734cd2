use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Association row linking a game and a person with the booked fee.
/// Many-to-many; has no identity of its own and no endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Performance {
    pub game_id: i64,
    pub person_id: i64,
    pub fee: f64,
}
