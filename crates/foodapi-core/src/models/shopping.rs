// ABOUTME: Shopping-list and data-import result types
// ABOUTME: ShoppingListItem is one aggregated (name, unit) line with its summed amount
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One aggregated shopping-list line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount summed over every cart recipe
    pub amount: i64,
}

/// Outcome of a reference-data import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Records inserted
    pub created: usize,
    /// Records skipped because they already existed
    pub skipped: usize,
}
