mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn director_token() -> String {
    common::token_with_permissions(&[
        "read:persons",
        "create:persons",
        "edit:persons",
        "delete:persons",
    ])
}

#[tokio::test]
async fn create_patch_delete_person_lifecycle() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping create_patch_delete_person_lifecycle: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = director_token();

    // Create with gender omitted
    let res = client
        .post(format!("{}/persons", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Crisso", "age": 25 }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(true));
    let id = body["created"].as_i64().expect("created id is an integer");

    // Partial update: only the age; name stays, gender was defaulted
    let res = client
        .patch(format!("{}/persons/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "age": 26 }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["updated"], id);
    let person = &body["person"][0];
    assert_eq!(person["name"], "Crisso");
    assert_eq!(person["age"], 26);
    assert_eq!(person["gender"], "Other");

    // Delete echoes the id from the url as a string
    let res = client
        .delete(format!("{}/persons/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["deleted"], id.to_string());

    // The record is gone afterwards
    let res = client
        .delete(format!("{}/persons/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        format!("Person with id {} not found in database.", id)
    );
    Ok(())
}

#[tokio::test]
async fn create_person_without_name_is_422() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping create_person_without_name_is_422: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/persons", server.base_url))
        .bearer_auth(director_token())
        .json(&json!({ "age": 25 }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"], 422);
    assert_eq!(body["message"], "no name provided.");
    Ok(())
}

#[tokio::test]
async fn create_person_without_body_is_400() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping create_person_without_body_is_400: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/persons", server.base_url))
        .bearer_auth(director_token())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "request does not contain a valid JSON body.");
    Ok(())
}

#[tokio::test]
async fn patch_unknown_person_is_404() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping patch_unknown_person_is_404: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/persons/999999", server.base_url))
        .bearer_auth(director_token())
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        "Person with id 999999 not found in database."
    );
    Ok(())
}

#[tokio::test]
async fn list_persons_page_beyond_range_is_404() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping list_persons_page_beyond_range_is_404: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/persons?page=999999999",
            server.base_url
        ))
        .bearer_auth(director_token())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "no persons found in database.");
    Ok(())
}

#[tokio::test]
async fn list_persons_returns_inserted_record() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping list_persons_returns_inserted_record: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = director_token();

    let res = client
        .post(format!("{}/persons", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Matthew", "age": 30, "gender": "Male" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let id = res.json::<Value>().await?["created"]
        .as_i64()
        .expect("created id");

    // Records are ordered by id, so the fresh insert sits on the last page
    let mut page = 1;
    let found = loop {
        let res = client
            .get(format!("{}/persons?page={}", server.base_url, page))
            .bearer_auth(&token)
            .send()
            .await?;
        if res.status() == StatusCode::NOT_FOUND {
            break None;
        }
        let body = res.json::<Value>().await?;
        let persons = body["persons"].as_array().expect("persons array").clone();
        if let Some(record) = persons.iter().find(|p| p["id"] == id) {
            break Some(record.clone());
        }
        page += 1;
    };

    let record = found.expect("inserted person shows up in the list");
    assert_eq!(record["name"], "Matthew");
    assert_eq!(record["gender"], "Male");
    assert_eq!(record["age"], 30);

    // Cleanup
    client
        .delete(format!("{}/persons/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    Ok(())
}
