mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn sync_replaces_the_product_table() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    app.request(
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({ "name": "Old", "quantity": 1 })),
    )
    .await?;

    let (status, body) = app
        .request(
            "POST",
            "/api/sync",
            Some(&token),
            Some(json!([
                { "id": 7, "name": "A", "category": "Tools", "quantity": 2, "location": "Shelf A" },
                { "name": "B", "quantity": 3 }
            ])),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Sync completed successfully", "inserted": 2 })
    );

    let (_, listed) = app.request("GET", "/api/products", Some(&token), None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["id"], 7);
    assert_eq!(listed[0]["category"], "Tools");
    assert_eq!(listed[1]["name"], "B");
    assert_eq!(listed[1]["category"], "Sin Categoría");
    Ok(())
}

#[tokio::test]
async fn empty_batch_clears_the_table() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    app.request(
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({ "name": "Old", "quantity": 1 })),
    )
    .await?;

    let (status, body) = app
        .request("POST", "/api/sync", Some(&token), Some(json!([])))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 0);

    let (_, listed) = app.request("GET", "/api/products", Some(&token), None).await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn non_array_body_is_a_bad_request() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let (status, body) = app
        .request("POST", "/api/sync", Some(&token), Some(json!({ "name": "A" })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Data must be an array of products");
    Ok(())
}

#[tokio::test]
async fn failing_record_rolls_back_the_whole_batch() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    app.request(
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({ "name": "Keep", "quantity": 4 })),
    )
    .await?;

    let (status, body) = app
        .request(
            "POST",
            "/api/sync",
            Some(&token),
            Some(json!([
                { "id": 1, "name": "A", "quantity": 1 },
                { "id": 1, "name": "B", "quantity": 1 }
            ])),
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Errors inserting some products");
    assert_eq!(body["details"][0]["index"], 1);
    assert_eq!(body["details"][0]["product"]["name"], "B");
    assert!(body["details"][0]["error"].is_string());

    let (_, listed) = app.request("GET", "/api/products", Some(&token), None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["name"], "Keep");
    Ok(())
}

#[tokio::test]
async fn sync_requires_a_token() -> Result<()> {
    let app = TestApp::new().await?;

    let (status, _) = app
        .request("POST", "/api/sync", None, Some(json!([])))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
