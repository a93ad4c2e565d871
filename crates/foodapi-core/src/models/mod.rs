// ABOUTME: Core data models for the recipe-sharing backend
// ABOUTME: Re-exports catalog, recipe, relation, shopping, and user types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Storage-agnostic domain types shared by the database layer, the services,
//! and the HTTP routes.
//!
//! ## Core Models
//!
//! - `Ingredient` / `Tag`: immutable reference catalog
//! - `Recipe`: an author's recipe row; `RecipeDetails` adds tags and amounts
//! - `RecipePayload` / `RecipeDraft`: inbound recipe data before and after merging
//! - `RelationKind`: the cart, favorite, and follow join relations
//! - `ShoppingListItem`: one aggregated line of a shopping list

// Domain modules
mod catalog;
mod recipe;
mod relation;
mod shopping;
mod user;

// Catalog domain
pub use catalog::{Ingredient, NewIngredient, NewTag, Tag};

// Recipe domain
pub use recipe::{
    IngredientAmount, IngredientEntry, Recipe, RecipeDetails, RecipeDraft, RecipeFilter,
    RecipePayload,
};

// Relation domain
pub use relation::RelationKind;

// Shopping domain
pub use shopping::{ImportReport, ShoppingListItem};

// User domain
pub use user::{NewUser, User};
