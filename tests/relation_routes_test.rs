// ABOUTME: HTTP integration tests for favorite, shopping-cart, and follow toggles
// ABOUTME: Covers add/remove semantics, self-follow rejection, and requester flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    create_authenticated_user, create_ingredient, create_test_resources, recipe_payload, test_app,
};
use foodapi_server::resources::ServerResources;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_favorite_toggle_twice() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "chef").await.unwrap();
    let flour = create_ingredient(&resources.database, "flour", "g")
        .await
        .unwrap();
    let recipe: Value = AxumTestRequest::post("/api/recipes/")
        .auth(&auth)
        .json(&recipe_payload("Bread", &[(flour.id, 500)], &[]))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let uri = format!("/api/recipes/{}/favorite/", recipe["id"]);

    let short: Value = AxumTestRequest::post(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(short["id"], recipe["id"]);
    assert_eq!(short["name"], "Bread");
    assert!(short.get("ingredients").is_none());

    let error: Value = AxumTestRequest::post(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(error["error"]["code"], "INVALID_INPUT");

    AxumTestRequest::delete(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::delete(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// Add twice then remove twice, returning the body of the first add
async fn toggle_twice(
    resources: &Arc<ServerResources>,
    uri: &str,
    auth: &str,
    already_added: &str,
    not_found: &str,
) -> Value {
    let created: Value = AxumTestRequest::post(uri)
        .auth(auth)
        .send(test_app(resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let error: Value = AxumTestRequest::post(uri)
        .auth(auth)
        .send(test_app(resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(error["error"]["code"], "INVALID_INPUT");
    assert_eq!(error["error"]["message"], already_added);

    let removed = AxumTestRequest::delete(uri)
        .auth(auth)
        .send(test_app(resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(removed.text().is_empty());

    let error: Value = AxumTestRequest::delete(uri)
        .auth(auth)
        .send(test_app(resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(error["error"]["message"], not_found);

    created
}

#[tokio::test]
async fn test_shopping_cart_toggle_twice() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "chef").await.unwrap();
    let flour = create_ingredient(&resources.database, "flour", "g")
        .await
        .unwrap();
    let recipe: Value = AxumTestRequest::post("/api/recipes/")
        .auth(&auth)
        .json(&recipe_payload("Bread", &[(flour.id, 500)], &[]))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let uri = format!("/api/recipes/{}/shopping_cart/", recipe["id"]);

    let short = toggle_twice(
        &resources,
        &uri,
        &auth,
        "Recipe already added to shopping cart",
        "Recipe not found in shopping cart",
    )
    .await;
    assert_eq!(short["id"], recipe["id"]);
    assert_eq!(short["cooking_time"], 30);
}

#[tokio::test]
async fn test_subscribe_toggle_twice() {
    let resources = create_test_resources().await.unwrap();
    let (author, _) = create_authenticated_user(&resources, "author").await.unwrap();
    let (_, reader) = create_authenticated_user(&resources, "reader").await.unwrap();
    let uri = format!("/api/users/{}/subscribe/", author.id);

    let subscription = toggle_twice(
        &resources,
        &uri,
        &reader,
        "Already subscribed to this author",
        "Not subscribed to this author",
    )
    .await;
    assert_eq!(subscription["id"], author.id);
    assert_eq!(subscription["is_subscribed"], true);
    assert_eq!(subscription["recipes_count"], 0);
}

#[tokio::test]
async fn test_flags_follow_the_requester() {
    let resources = create_test_resources().await.unwrap();
    let (_, author) = create_authenticated_user(&resources, "author").await.unwrap();
    let (_, reader) = create_authenticated_user(&resources, "reader").await.unwrap();
    let flour = create_ingredient(&resources.database, "flour", "g")
        .await
        .unwrap();
    let recipe: Value = AxumTestRequest::post("/api/recipes/")
        .auth(&author)
        .json(&recipe_payload("Bread", &[(flour.id, 500)], &[]))
        .send(test_app(&resources))
        .await
        .json();
    let id = recipe["id"].as_i64().unwrap();

    AxumTestRequest::post(&format!("/api/recipes/{id}/favorite/"))
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED);
    AxumTestRequest::post(&format!("/api/recipes/{id}/shopping_cart/"))
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let as_reader: Value = AxumTestRequest::get(&format!("/api/recipes/{id}/"))
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(as_reader["is_favorited"], true);
    assert_eq!(as_reader["is_in_shopping_cart"], true);

    let as_author: Value = AxumTestRequest::get(&format!("/api/recipes/{id}/"))
        .auth(&author)
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(as_author["is_favorited"], false);

    let anonymous: Value = AxumTestRequest::get(&format!("/api/recipes/{id}/"))
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(anonymous["is_favorited"], false);
    assert_eq!(anonymous["is_in_shopping_cart"], false);

    let favorites: Value = AxumTestRequest::get("/api/recipes/?is_favorited=1")
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(favorites["count"], 1);

    let cart: Value = AxumTestRequest::get("/api/recipes/?is_in_shopping_cart=1")
        .auth(&author)
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(cart["count"], 0);
}

#[tokio::test]
async fn test_relation_on_missing_recipe_is_not_found() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "chef").await.unwrap();

    AxumTestRequest::post("/api/recipes/4242/shopping_cart/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    AxumTestRequest::delete("/api/recipes/4242/favorite/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_self_follow_is_rejected_both_ways() {
    let resources = create_test_resources().await.unwrap();
    let (me, auth) = create_authenticated_user(&resources, "narcissus").await.unwrap();
    let uri = format!("/api/users/{}/subscribe/", me.id);

    let error: Value = AxumTestRequest::post(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(error["error"]["code"], "INVALID_INPUT");

    AxumTestRequest::delete(&uri)
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_relations_require_authentication() {
    let resources = create_test_resources().await.unwrap();

    AxumTestRequest::post("/api/recipes/1/favorite/")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    AxumTestRequest::post("/api/users/1/subscribe/")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
