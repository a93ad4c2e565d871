// ABOUTME: HTTP integration tests for the user directory and subscriptions
// ABOUTME: Covers /me, is_subscribed flags, recipe previews, and recipes_limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{
    create_authenticated_user, create_ingredient, create_test_resources, recipe_payload, test_app,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_me_requires_authentication() {
    let resources = create_test_resources().await.unwrap();
    let (me, auth) = create_authenticated_user(&resources, "me").await.unwrap();

    AxumTestRequest::get("/api/users/me/")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = AxumTestRequest::get("/api/users/me/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["id"], me.id);
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["is_subscribed"], false);
}

#[tokio::test]
async fn test_user_list_is_paginated_with_follow_flags() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "reader").await.unwrap();
    let (author, _) = create_authenticated_user(&resources, "author").await.unwrap();
    for n in 0..6 {
        create_authenticated_user(&resources, &format!("extra{n}"))
            .await
            .unwrap();
    }

    AxumTestRequest::post(&format!("/api/users/{}/subscribe/", author.id))
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let page: Value = AxumTestRequest::get("/api/users/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["count"], 8);
    assert_eq!(page["results"].as_array().unwrap().len(), 6);
    assert_eq!(page["results"][0]["is_subscribed"], false);
    assert_eq!(page["results"][1]["username"], "author");
    assert_eq!(page["results"][1]["is_subscribed"], true);
    assert_eq!(page["next"], "/api/users/?page=2");

    let detail: Value = AxumTestRequest::get(&format!("/api/users/{}/", author.id))
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(detail["is_subscribed"], false);

    AxumTestRequest::get("/api/users/9999/")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscribe_returns_recipe_preview() {
    let resources = create_test_resources().await.unwrap();
    let (_, reader) = create_authenticated_user(&resources, "reader").await.unwrap();
    let (author, author_auth) = create_authenticated_user(&resources, "author")
        .await
        .unwrap();
    let flour = create_ingredient(&resources.database, "flour", "g")
        .await
        .unwrap();
    for name in ["Bread", "Buns", "Cake"] {
        AxumTestRequest::post("/api/recipes/")
            .auth(&author_auth)
            .json(&recipe_payload(name, &[(flour.id, 100)], &[]))
            .send(test_app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let uri = format!("/api/users/{}/subscribe/?recipes_limit=2", author.id);
    let body: Value = AxumTestRequest::post(&uri)
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(body["username"], "author");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["name"], "Bread");
    assert!(recipes[0].get("text").is_none());

    AxumTestRequest::post(&uri)
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let subscriptions: Value = AxumTestRequest::get("/api/users/subscriptions/")
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(subscriptions["count"], 1);
    assert_eq!(
        subscriptions["results"][0]["recipes"]
            .as_array()
            .unwrap()
            .len(),
        3
    );

    let limited: Value = AxumTestRequest::get("/api/users/subscriptions/?recipes_limit=1")
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .json();
    assert_eq!(
        limited["results"][0]["recipes"].as_array().unwrap().len(),
        1
    );
    assert_eq!(limited["results"][0]["recipes_count"], 3);

    AxumTestRequest::delete(&format!("/api/users/{}/subscribe/", author.id))
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::delete(&format!("/api/users/{}/subscribe/", author.id))
        .auth(&reader)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_recipes_limit_is_rejected() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "reader").await.unwrap();

    AxumTestRequest::get("/api/users/subscriptions/?recipes_limit=-1")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscribe_to_unknown_author_is_not_found() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "reader").await.unwrap();

    AxumTestRequest::post("/api/users/777/subscribe/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
