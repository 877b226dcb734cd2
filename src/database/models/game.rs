use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

/// Insert payload; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub release_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_record_shape() {
        let game = Game {
            id: 7,
            title: "Half-Life 3".to_string(),
            release_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&game).unwrap(),
            json!({ "id": 7, "title": "Half-Life 3", "release_date": "2026-03-15" })
        );
    }
}
