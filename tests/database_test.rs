// ABOUTME: Integration tests for the database managers over in-memory SQLite
// ABOUTME: Covers uniqueness mapping, cascades, transactional writes, and relation sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_ingredient, create_tag, create_test_database, create_test_user, TEST_IMAGE};
use foodapi_server::{
    errors::ErrorCode,
    models::{IngredientEntry, NewIngredient, NewUser, RecipeDraft, RelationKind},
};

fn draft(name: &str, ingredients: &[(i64, i64)], tags: &[i64]) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        image: TEST_IMAGE.to_owned(),
        text: "Mix everything".to_owned(),
        cooking_time: 20,
        ingredients: ingredients
            .iter()
            .map(|&(id, amount)| IngredientEntry { id, amount })
            .collect(),
        tags: tags.to_vec(),
    }
}

#[tokio::test]
async fn test_duplicate_username_is_already_exists() {
    let database = create_test_database().await.unwrap();
    create_test_user(&database, "cook").await.unwrap();

    let err = database
        .users()
        .create(&NewUser {
            email: "other@example.com".into(),
            username: "cook".into(),
            first_name: String::new(),
            last_name: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_duplicate_ingredient_pair_is_already_exists() {
    let database = create_test_database().await.unwrap();
    create_ingredient(&database, "salt", "g").await.unwrap();
    create_ingredient(&database, "salt", "pinch").await.unwrap();

    let err = database
        .catalog()
        .create_ingredient(&NewIngredient {
            name: "salt".into(),
            measurement_unit: "g".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_missing_ids_report_unknown_references() {
    let database = create_test_database().await.unwrap();
    let salt = create_ingredient(&database, "salt", "g").await.unwrap();
    let tag = create_tag(&database, "soup").await.unwrap();

    let missing = database
        .catalog()
        .missing_ingredient_ids(&[salt.id, 77, 78])
        .await
        .unwrap();
    assert_eq!(missing, vec![77, 78]);

    let missing = database
        .catalog()
        .missing_tag_ids(&[tag.id])
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_insert_and_update_in_transaction() {
    let database = create_test_database().await.unwrap();
    let author = create_test_user(&database, "cook").await.unwrap();
    let salt = create_ingredient(&database, "salt", "g").await.unwrap();
    let water = create_ingredient(&database, "water", "ml").await.unwrap();
    let soup = create_tag(&database, "soup").await.unwrap();

    let mut guard = database.begin().await.unwrap();
    let id = database
        .recipes()
        .insert(&mut guard, author.id, &draft("Broth", &[(water.id, 500), (salt.id, 5)], &[soup.id]))
        .await
        .unwrap();
    guard.commit().await.unwrap();

    let ingredients = database.recipes().ingredients_for(&[id]).await.unwrap();
    let amounts: Vec<(i64, i64)> = ingredients[&id].iter().map(|i| (i.id, i.amount)).collect();
    assert_eq!(amounts, vec![(water.id, 500), (salt.id, 5)]);

    let mut guard = database.begin().await.unwrap();
    database
        .recipes()
        .update(&mut guard, id, &draft("Salty broth", &[(salt.id, 10)], &[]))
        .await
        .unwrap();
    guard.commit().await.unwrap();

    let recipe = database.recipes().get(id).await.unwrap().unwrap();
    assert_eq!(recipe.name, "Salty broth");
    let ingredients = database.recipes().ingredients_for(&[id]).await.unwrap();
    assert_eq!(ingredients[&id].len(), 1);
    let tags = database.recipes().tags_for(&[id]).await.unwrap();
    assert!(tags.get(&id).cloned().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_dropped_transaction_rolls_back() {
    let database = create_test_database().await.unwrap();
    let author = create_test_user(&database, "cook").await.unwrap();
    let salt = create_ingredient(&database, "salt", "g").await.unwrap();

    {
        let mut guard = database.begin().await.unwrap();
        database
            .recipes()
            .insert(&mut guard, author.id, &draft("Draft", &[(salt.id, 1)], &[]))
            .await
            .unwrap();
    }

    assert_eq!(database.recipes().count_by_author(author.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_of_missing_recipe_is_not_found() {
    let database = create_test_database().await.unwrap();
    let salt = create_ingredient(&database, "salt", "g").await.unwrap();

    let mut guard = database.begin().await.unwrap();
    let err = database
        .recipes()
        .update(&mut guard, 404, &draft("Ghost", &[(salt.id, 1)], &[]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_relations_and_cascade_on_recipe_delete() {
    let database = create_test_database().await.unwrap();
    let author = create_test_user(&database, "cook").await.unwrap();
    let fan = create_test_user(&database, "fan").await.unwrap();
    let salt = create_ingredient(&database, "salt", "g").await.unwrap();

    let mut guard = database.begin().await.unwrap();
    let first = database
        .recipes()
        .insert(&mut guard, author.id, &draft("One", &[(salt.id, 1)], &[]))
        .await
        .unwrap();
    let second = database
        .recipes()
        .insert(&mut guard, author.id, &draft("Two", &[(salt.id, 2)], &[]))
        .await
        .unwrap();
    guard.commit().await.unwrap();

    let relations = database.relations();
    relations
        .insert(RelationKind::Favorite, fan.id, first)
        .await
        .unwrap();
    relations
        .insert(RelationKind::ShoppingCart, fan.id, second)
        .await
        .unwrap();
    let err = relations
        .insert(RelationKind::Favorite, fan.id, first)
        .await
        .unwrap_err();
    assert!(err.is_already_exists());

    let favorites = relations
        .targets_among(RelationKind::Favorite, fan.id, &[first, second])
        .await
        .unwrap();
    assert!(favorites.contains(&first));
    assert!(!favorites.contains(&second));

    let rows = database.shopping().cart_ingredient_rows(fan.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 2);

    assert!(database.recipes().delete(first).await.unwrap());
    assert!(!relations
        .exists(RelationKind::Favorite, fan.id, first)
        .await
        .unwrap());
    assert!(!database.recipes().delete(first).await.unwrap());
}

#[tokio::test]
async fn test_followed_authors_are_paged() {
    let database = create_test_database().await.unwrap();
    let reader = create_test_user(&database, "reader").await.unwrap();
    for n in 0..3 {
        let author = create_test_user(&database, &format!("author{n}")).await.unwrap();
        database
            .relations()
            .insert(RelationKind::Follow, reader.id, author.id)
            .await
            .unwrap();
    }

    let page = foodapi_server::pagination::PageParams::resolve(Some(2), Some(2), 6, 100).unwrap();
    let (authors, count) = database
        .relations()
        .followed_authors(reader.id, page)
        .await
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].username, "author2");
}
