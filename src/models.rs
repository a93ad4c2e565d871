// ABOUTME: Re-exports domain models from foodapi-core
// ABOUTME: Catalog, recipe, relation, shopping, and user types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use foodapi_core::models::*;
