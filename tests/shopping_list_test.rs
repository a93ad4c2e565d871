// ABOUTME: Integration tests for the shopping-list download endpoint
// ABOUTME: Checks aggregation across cart recipes and attachment headers
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
async fn test_download_aggregates_cart_ingredients() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "alice").await.unwrap();
    let flour = create_ingredient(&resources.database, "flour", "g")
        .await
        .unwrap();
    let eggs = create_ingredient(&resources.database, "eggs", "pcs")
        .await
        .unwrap();

    for (name, amount) in [("Bread", 300), ("Cake", 200)] {
        let recipe: Value = AxumTestRequest::post("/api/recipes/")
            .auth(&auth)
            .json(&recipe_payload(name, &[(flour.id, amount), (eggs.id, 2)], &[]))
            .send(test_app(&resources))
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        AxumTestRequest::post(&format!("/api/recipes/{}/shopping_cart/", recipe["id"]))
            .auth(&auth)
            .send(test_app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = AxumTestRequest::get("/api/recipes/download_shopping_cart/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        response.header("content-disposition").as_deref(),
        Some("attachment; filename=\"alice_shopping_list.txt\"")
    );
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("text/plain"));

    let text = response.text();
    assert_eq!(
        text,
        "Shopping list for alice:\neggs pcs - 4\nflour g - 500\n"
    );
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let resources = create_test_resources().await.unwrap();
    let (_, auth) = create_authenticated_user(&resources, "bob").await.unwrap();

    let error: Value = AxumTestRequest::get("/api/recipes/download_shopping_cart/")
        .auth(&auth)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(error["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_download_requires_authentication() {
    let resources = create_test_resources().await.unwrap();

    AxumTestRequest::get("/api/recipes/download_shopping_cart/")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
