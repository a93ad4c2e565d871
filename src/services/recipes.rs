// ABOUTME: Recipe composition: validation, ownership checks, and transactional writes
// ABOUTME: Keeps the recipe row, ingredient amounts, and tag links consistent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use tracing::info;

use crate::constants::limits::{
    MAX_COOKING_TIME, MAX_INGREDIENT_AMOUNT, MAX_NAME_LENGTH, MIN_COOKING_TIME,
    MIN_INGREDIENT_AMOUNT,
};
use crate::database::repositories::CatalogRepository;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Recipe, RecipeDetails, RecipeDraft, RecipeFilter, RecipePayload, User,
};
use crate::pagination::PageParams;

fn data_uri_regex() -> Option<&'static Regex> {
    static DATA_URI_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    DATA_URI_REGEX
        .get_or_init(|| Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,([A-Za-z0-9+/=\s]+)$").ok())
        .as_ref()
}

// ============================================================================
// Validation
// ============================================================================

/// Check a draft without touching storage and normalize its tag set
///
/// Tag ids are deduplicated keeping first occurrence. Ingredient ids are
/// never deduplicated: a repeated ingredient is an error.
///
/// # Errors
///
/// Returns a field-level validation error for the first violated rule
pub fn validate_draft(mut draft: RecipeDraft) -> AppResult<RecipeDraft> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(
            "name",
            format!("name cannot exceed {MAX_NAME_LENGTH} characters"),
        ));
    }

    validate_image(&draft.image)?;

    if draft.cooking_time < MIN_COOKING_TIME {
        return Err(AppError::out_of_range(
            "cooking_time",
            format!("cooking_time must be at least {MIN_COOKING_TIME}"),
        ));
    }
    if draft.cooking_time > MAX_COOKING_TIME {
        return Err(AppError::out_of_range(
            "cooking_time",
            format!("cooking_time cannot exceed {MAX_COOKING_TIME}"),
        ));
    }

    if draft.ingredients.is_empty() {
        return Err(AppError::validation("ingredients", "ingredients required"));
    }

    let mut seen = HashSet::with_capacity(draft.ingredients.len());
    for entry in &draft.ingredients {
        if !seen.insert(entry.id) {
            return Err(AppError::validation("ingredients", "duplicate ingredient"));
        }
        if entry.amount < MIN_INGREDIENT_AMOUNT {
            return Err(AppError::out_of_range(
                "ingredients",
                format!("amount must be at least {MIN_INGREDIENT_AMOUNT}"),
            ));
        }
        if entry.amount > MAX_INGREDIENT_AMOUNT {
            return Err(AppError::out_of_range(
                "ingredients",
                format!("amount cannot exceed {MAX_INGREDIENT_AMOUNT}"),
            ));
        }
    }

    let mut tags_seen = HashSet::with_capacity(draft.tags.len());
    draft.tags.retain(|id| tags_seen.insert(*id));

    Ok(draft)
}

fn validate_image(image: &str) -> AppResult<()> {
    let pattern = data_uri_regex()
        .ok_or_else(|| AppError::internal("Image pattern failed to compile"))?;

    let payload = pattern
        .captures(image)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            AppError::validation("image", "image must be a base64 data:image URI")
        })?;

    let compact: String = payload.split_whitespace().collect();
    match STANDARD.decode(compact) {
        Ok(bytes) if !bytes.is_empty() => Ok(()),
        _ => Err(AppError::validation("image", "image payload is not valid base64")),
    }
}

/// Check that every referenced ingredient and tag exists
///
/// # Errors
///
/// Returns `ResourceNotFound` naming the first missing ingredient or tag
pub async fn ensure_references_exist(
    catalog: &dyn CatalogRepository,
    draft: &RecipeDraft,
) -> AppResult<()> {
    let ingredient_ids: Vec<i64> = draft.ingredients.iter().map(|entry| entry.id).collect();
    if let Some(missing) = catalog
        .missing_ingredient_ids(&ingredient_ids)
        .await?
        .first()
    {
        return Err(AppError::not_found(format!("Ingredient {missing}")));
    }

    if let Some(missing) = catalog.missing_tag_ids(&draft.tags).await?.first() {
        return Err(AppError::not_found(format!("Tag {missing}")));
    }

    Ok(())
}

/// Only the author may change or delete a recipe
///
/// # Errors
///
/// Returns `PermissionDenied` for anyone else
pub fn ensure_owner(recipe: &Recipe, user: &User) -> AppResult<()> {
    if recipe.author_id == user.id {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Only the author can modify this recipe",
        ))
    }
}

// ============================================================================
// Reads
// ============================================================================

/// Load authors, tags, and ingredient amounts for a batch of recipes
///
/// Runs a fixed number of queries regardless of batch size. Order is kept.
///
/// # Errors
///
/// Returns an error if a query fails or an author row is missing
pub async fn load_details(db: &Database, recipes: Vec<Recipe>) -> AppResult<Vec<RecipeDetails>> {
    let recipe_ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<i64> = recipes.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i64, User> = db
        .users()
        .get_many(&author_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();
    let mut tags = db.recipes().tags_for(&recipe_ids).await?;
    let mut ingredients = db.recipes().ingredients_for(&recipe_ids).await?;

    recipes
        .into_iter()
        .map(|recipe| {
            let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                AppError::internal(format!("Author {} of recipe {} is missing", recipe.author_id, recipe.id))
            })?;
            Ok(RecipeDetails {
                tags: tags.remove(&recipe.id).unwrap_or_default(),
                ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                author,
                recipe,
            })
        })
        .collect()
}

/// Fetch one recipe with its associations
///
/// # Errors
///
/// Returns `ResourceNotFound` if the recipe does not exist
pub async fn get_recipe(db: &Database, recipe_id: i64) -> AppResult<RecipeDetails> {
    let recipe = db
        .recipes()
        .get(recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe"))?;

    load_details(db, vec![recipe])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Recipe details vanished while loading"))
}

/// One page of recipes matching `filter`, with the total match count
///
/// # Errors
///
/// Returns `ResourceNotFound` for a page past the end, or a database error
pub async fn list_recipes(
    db: &Database,
    filter: &RecipeFilter,
    requester: Option<&User>,
    page: PageParams,
) -> AppResult<(Vec<RecipeDetails>, i64)> {
    let (recipes, count) = db
        .recipes()
        .list(filter, requester.map(|user| user.id), page)
        .await?;
    page.ensure_in_range(count)?;

    Ok((load_details(db, recipes).await?, count))
}

// ============================================================================
// Writes
// ============================================================================

/// Validate and store a new recipe owned by `author`
///
/// The recipe row, ingredient amounts, and tag links are written in one
/// transaction.
///
/// # Errors
///
/// Returns a validation, not-found, or database error; nothing is written
/// on failure
pub async fn create_recipe(
    db: &Database,
    catalog: &dyn CatalogRepository,
    author: &User,
    payload: RecipePayload,
) -> AppResult<RecipeDetails> {
    let draft = validate_draft(payload.into_draft(None)?)?;
    ensure_references_exist(catalog, &draft).await?;

    let mut guard = db.begin().await?;
    let recipe_id = db.recipes().insert(&mut guard, author.id, &draft).await?;
    guard.commit().await?;

    info!(recipe_id, author_id = author.id, "Recipe created");
    get_recipe(db, recipe_id).await
}

/// Replace a recipe's fields, ingredients, and tags
///
/// Scalar fields missing from `payload` keep their stored values; the
/// ingredient and tag sets are always replaced.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `PermissionDenied`, a validation error, or a
/// database error; nothing is written on failure
pub async fn update_recipe(
    db: &Database,
    catalog: &dyn CatalogRepository,
    requester: &User,
    recipe_id: i64,
    payload: RecipePayload,
) -> AppResult<RecipeDetails> {
    let current = db
        .recipes()
        .get(recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe"))?;
    ensure_owner(&current, requester)?;

    let draft = validate_draft(payload.into_draft(Some(&current))?)?;
    ensure_references_exist(catalog, &draft).await?;

    let mut guard = db.begin().await?;
    db.recipes().update(&mut guard, recipe_id, &draft).await?;
    guard.commit().await?;

    info!(recipe_id, "Recipe updated");
    get_recipe(db, recipe_id).await
}

/// Delete a recipe owned by `requester`
///
/// # Errors
///
/// Returns `ResourceNotFound` or `PermissionDenied`
pub async fn delete_recipe(db: &Database, requester: &User, recipe_id: i64) -> AppResult<()> {
    let recipe = db
        .recipes()
        .get(recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe"))?;
    ensure_owner(&recipe, requester)?;

    if !db.recipes().delete(recipe_id).await? {
        return Err(AppError::not_found("Recipe"));
    }
    info!(recipe_id, "Recipe deleted");
    Ok(())
}
