use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::pagination::{page_from_query, paginate};
use crate::config;
use crate::database::models::person::NewPerson;
use crate::error::ApiError;
use crate::middleware::auth::{CreatePersons, DeletePersons, EditPersons, ReadPersons};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-indexed page number; lenient parse, defaults to 1
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonBody {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonBody {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl CreatePersonBody {
    fn into_new_person(self) -> Result<NewPerson, ApiError> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::unprocessable_entity("no name provided."))?;

        let age = self
            .age
            .filter(|age| *age > 0)
            .ok_or_else(|| ApiError::unprocessable_entity("no age provided."))?;

        Ok(NewPerson {
            name,
            age,
            gender: self.gender.unwrap_or_else(|| "Other".to_string()),
        })
    }
}

fn person_id_from_path(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::bad_request("please append an person id to the request url.")
    })
}

fn person_not_found(raw_id: &str) -> ApiError {
    ApiError::not_found(format!("Person with id {} not found in database.", raw_id))
}

/// GET /persons - paginated person records
pub async fn list(
    ReadPersons(_claims): ReadPersons,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let selection = state.db.persons().find_all().await?;

    let page = page_from_query(query.page.as_deref());
    let persons = paginate(&selection, page, config::config().api.rows_per_page);

    // An empty slice and an empty table are deliberately not distinguished
    if persons.is_empty() {
        return Err(ApiError::not_found("no persons found in database."));
    }

    Ok(Json(json!({
        "success": true,
        "persons": persons
    })))
}

/// POST /persons - insert a new person
pub async fn create(
    CreatePersons(_claims): CreatePersons,
    State(state): State<AppState>,
    body: Option<Json<CreatePersonBody>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    };

    let new_person = body.into_new_person()?;
    let created = state.db.persons().insert(new_person).await?;

    Ok(Json(json!({
        "success": true,
        "created": created
    })))
}

/// PATCH /persons/:person_id - partial update; omitted fields keep their
/// stored values
pub async fn update(
    EditPersons(_claims): EditPersons,
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    body: Option<Json<UpdatePersonBody>>,
) -> Result<Json<Value>, ApiError> {
    let id = person_id_from_path(&person_id)?;

    let Some(Json(body)) = body else {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    };

    let store = state.db.persons();
    let mut person = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| person_not_found(&person_id))?;

    if let Some(name) = body.name {
        person.name = name;
    }
    if let Some(age) = body.age {
        person.age = age;
    }
    if let Some(gender) = body.gender {
        person.gender = gender;
    }

    store.update(&person).await?;

    Ok(Json(json!({
        "success": true,
        "updated": person.id,
        "person": [person]
    })))
}

/// DELETE /persons/:person_id - delete and echo the id from the url
pub async fn delete(
    DeletePersons(_claims): DeletePersons,
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = person_id_from_path(&person_id)?;

    let store = state.db.persons();
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| person_not_found(&person_id))?;

    store.delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "deleted": person_id
    })))
}
