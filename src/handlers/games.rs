use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::pagination::{page_from_query, paginate};
use crate::config;
use crate::database::models::game::NewGame;
use crate::error::ApiError;
use crate::middleware::auth::{CreateGames, DeleteGames, EditGames, ReadGames};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-indexed page number; lenient parse, defaults to 1
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameBody {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGameBody {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl CreateGameBody {
    fn into_new_game(self) -> Result<NewGame, ApiError> {
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| ApiError::unprocessable_entity("no title provided."))?;

        let release_date = self
            .release_date
            .ok_or_else(|| ApiError::unprocessable_entity("no \"release_date\" provided."))?;

        Ok(NewGame {
            title,
            release_date,
        })
    }
}

fn game_id_from_path(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("please append an game id to the request url."))
}

fn game_not_found(raw_id: &str) -> ApiError {
    ApiError::not_found(format!("Game with id {} not found in database.", raw_id))
}

/// GET /games - paginated game records
pub async fn list(
    ReadGames(_claims): ReadGames,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let selection = state.db.games().find_all().await?;

    let page = page_from_query(query.page.as_deref());
    let games = paginate(&selection, page, config::config().api.rows_per_page);

    // An empty slice and an empty table are deliberately not distinguished
    if games.is_empty() {
        return Err(ApiError::not_found("no games found in database."));
    }

    Ok(Json(json!({
        "success": true,
        "games": games
    })))
}

/// POST /games - insert a new game
pub async fn create(
    CreateGames(_claims): CreateGames,
    State(state): State<AppState>,
    body: Option<Json<CreateGameBody>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    };

    let new_game = body.into_new_game()?;
    let created = state.db.games().insert(new_game).await?;

    Ok(Json(json!({
        "success": true,
        "created": created
    })))
}

/// PATCH /games/:game_id - partial update; omitted fields keep their
/// stored values
pub async fn update(
    EditGames(_claims): EditGames,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Option<Json<UpdateGameBody>>,
) -> Result<Json<Value>, ApiError> {
    let id = game_id_from_path(&game_id)?;

    let Some(Json(body)) = body else {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    };

    let store = state.db.games();
    let mut game = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| game_not_found(&game_id))?;

    if let Some(title) = body.title {
        game.title = title;
    }
    if let Some(release_date) = body.release_date {
        game.release_date = release_date;
    }

    store.update(&game).await?;

    Ok(Json(json!({
        "success": true,
        "edited": game.id,
        "game": [game]
    })))
}

/// DELETE /games/:game_id - delete and echo the id from the url
pub async fn delete(
    DeleteGames(_claims): DeleteGames,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = game_id_from_path(&game_id)?;

    let store = state.db.games();
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| game_not_found(&game_id))?;

    store.delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "deleted": game_id
    })))
}
