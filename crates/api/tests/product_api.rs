//! HTTP-level integration tests for the product endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, backed by the in-memory store.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;

async fn create_product(app: axum::Router, payload: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, "/api/products", payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_on_empty_catalog_returns_empty_array() {
    let app = common::build_test_app();
    let response = get(app, "/api/products").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn created_product_can_be_fetched_by_returned_id() {
    let app = common::build_test_app();

    let created = create_product(app.clone(), json!({"title": "Widget", "price": 9.99})).await;
    assert_eq!(created["message"], "Product added");
    assert_eq!(created["product"]["title"], "Widget");
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = get(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["title"], "Widget");
    assert_eq!(json["price"], 9.99);
}

#[tokio::test]
async fn created_product_echoes_all_supplied_fields() {
    let app = common::build_test_app();

    let created = create_product(
        app,
        json!({
            "title": "Phone",
            "shortDesc": "Pocket computer",
            "fullDesc": "A very long description",
            "price": 499.0,
            "image": "/img/phone.png",
            "createdAt": "2024-01-02T03:04:05Z",
        }),
    )
    .await;

    let product = &created["product"];
    assert_eq!(product["shortDesc"], "Pocket computer");
    assert_eq!(product["fullDesc"], "A very long description");
    assert_eq!(product["price"], 499.0);
    assert_eq!(product["image"], "/img/phone.png");
    assert_eq!(product["createdAt"], "2024-01-02T03:04:05Z");
    assert!(product["updatedAt"].is_string());
}

#[tokio::test]
async fn client_cannot_choose_the_id() {
    let app = common::build_test_app();
    let chosen = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    let created = create_product(app, json!({"id": chosen, "title": "Widget", "colour": "red"})).await;

    assert_ne!(created["product"]["id"], chosen);
    assert!(created["product"].get("colour").is_none());
}

fn titles(list: &serde_json::Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn list_returns_products_in_creation_order() {
    let app = common::build_test_app();
    create_product(
        app.clone(),
        json!({"title": "Second", "createdAt": "2024-02-01T00:00:00Z"}),
    )
    .await;
    create_product(
        app.clone(),
        json!({"title": "First", "createdAt": "2024-01-01T00:00:00Z"}),
    )
    .await;
    create_product(
        app.clone(),
        json!({"title": "Third", "createdAt": "2024-03-01T00:00:00Z"}),
    )
    .await;

    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(titles(&json), vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn backdated_product_is_listed_before_newer_ones() {
    let app = common::build_test_app();
    create_product(app.clone(), json!({"title": "Now"})).await;
    create_product(
        app.clone(),
        json!({"title": "Old", "createdAt": "2000-01-01T00:00:00Z"}),
    )
    .await;

    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(titles(&json), vec!["Old", "Now"]);
}

#[tokio::test]
async fn create_without_title_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/products", json!({"price": 1.0})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn create_with_empty_title_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app.clone(), "/api/products", json!({"title": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_INPUT");

    // Nothing was stored.
    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn whitespace_and_long_titles_are_accepted() {
    let app = common::build_test_app();
    let long_title = "x".repeat(201);

    let blank = create_product(app.clone(), json!({"title": "   "})).await;
    let long = create_product(app, json!({"title": long_title})).await;

    assert_eq!(blank["product"]["title"], "   ");
    assert_eq!(long["product"]["title"], long_title.as_str());
}

#[tokio::test]
async fn create_with_non_object_body_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/products", json!(["title", "Widget"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_wrongly_typed_price_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/products", json!({"title": "Widget", "price": "cheap"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = common::build_test_app();
    let created = create_product(
        app.clone(),
        json!({"title": "Widget", "shortDesc": "small", "price": 9.99}),
    )
    .await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = put_json(app.clone(), &format!("/api/products/{id}"), json!({"price": 12.5})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Product updated");
    assert_eq!(json["product"]["price"], 12.5);
    assert_eq!(json["product"]["title"], "Widget");
    assert_eq!(json["product"]["shortDesc"], "small");

    // The stored record reflects the update too.
    let json = body_json(get(app, &format!("/api/products/{id}")).await).await;
    assert_eq!(json["price"], 12.5);
    assert_eq!(json["title"], "Widget");
}

#[tokio::test]
async fn null_in_update_clears_optional_fields() {
    let app = common::build_test_app();
    let created = create_product(
        app.clone(),
        json!({"title": "W", "shortDesc": "small", "price": 9.99}),
    )
    .await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = put_json(
        app.clone(),
        &format!("/api/products/{id}"),
        json!({"shortDesc": null, "price": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("/api/products/{id}")).await).await;
    assert_eq!(json["title"], "W");
    assert!(json["shortDesc"].is_null());
    assert!(json["price"].is_null());
}

#[tokio::test]
async fn update_with_null_title_returns_400() {
    let app = common::build_test_app();
    let created = create_product(app.clone(), json!({"title": "Widget"})).await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = put_json(app.clone(), &format!("/api/products/{id}"), json!({"title": null})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    let json = body_json(get(app, &format!("/api/products/{id}")).await).await;
    assert_eq!(json["title"], "Widget");
}

#[tokio::test]
async fn update_with_blank_title_returns_400() {
    let app = common::build_test_app();
    let created = create_product(app.clone(), json!({"title": "Widget"})).await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = put_json(app, &format!("/api/products/{id}"), json!({"title": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_unknown_id_returns_404() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = put_json(app, &format!("/api/products/{id}"), json!({"title": "Ghost"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleted_product_is_no_longer_returned() {
    let app = common::build_test_app();
    let created = create_product(app.clone(), json!({"title": "Delete Me", "price": 1.0})).await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let response = delete(app.clone(), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Product deleted"}));

    let response = get(app.clone(), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn delete_of_unknown_id_returns_404() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = delete(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_of_unknown_id_returns_404_with_message() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = get(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["message"], format!("Product with id {id} not found"));
}

#[tokio::test]
async fn malformed_id_returns_400_on_every_id_route() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/products/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    let response = put_json(app.clone(), "/api/products/not-a-uuid", json!({"title": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(app, "/api/products/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
