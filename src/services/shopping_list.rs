// ABOUTME: Shopping-list aggregation across every recipe in a user's cart
// ABOUTME: Sums amounts per (ingredient, unit) and renders the plain-text download
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::info;

use crate::constants::shopping_list::FILENAME_SUFFIX;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ShoppingListItem, User};

/// A rendered shopping list ready to be served as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListFile {
    /// Attachment filename
    pub filename: String,
    /// Plain-text body
    pub content: String,
}

/// Merge rows with the same (name, unit), summing amounts
///
/// Output is sorted by name, then unit.
///
/// # Errors
///
/// Returns `ValueOutOfRange` if a total does not fit in an `i64`
pub fn aggregate(
    rows: impl IntoIterator<Item = ShoppingListItem>,
) -> AppResult<Vec<ShoppingListItem>> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        let total = totals.entry((row.name, row.measurement_unit)).or_insert(0);
        *total = total.checked_add(row.amount).ok_or_else(|| {
            AppError::out_of_range("amount", "shopping list total is too large")
        })?;
    }

    Ok(totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect())
}

/// Render the list body: a header line, then `"<name> <unit> - <amount>"` lines
#[must_use]
pub fn render(username: &str, items: &[ShoppingListItem]) -> String {
    let mut text = format!("Shopping list for {username}:\n");
    for item in items {
        // Writing to a String cannot fail
        let _ = writeln!(text, "{} {} - {}", item.name, item.measurement_unit, item.amount);
    }
    text
}

/// Attachment filename for `username`
#[must_use]
pub fn filename(username: &str) -> String {
    format!("{username}{FILENAME_SUFFIX}")
}

/// Build the shopping list for everything in `user`'s cart
///
/// # Errors
///
/// Returns `InvalidInput` when the cart is empty, or a database error
pub async fn build_shopping_list(db: &Database, user: &User) -> AppResult<ShoppingListFile> {
    let rows = db.shopping().cart_ingredient_rows(user.id).await?;
    if rows.is_empty() {
        return Err(AppError::invalid_input("Shopping cart is empty"));
    }

    let items = aggregate(rows)?;
    info!(user_id = user.id, items = items.len(), "Shopping list generated");

    Ok(ShoppingListFile {
        filename: filename(&user.username),
        content: render(&user.username, &items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.into(),
            measurement_unit: unit.into(),
            amount,
        }
    }

    #[test]
    fn test_amounts_summed_per_ingredient_and_unit() {
        let items = aggregate([
            row("flour", "g", 200),
            row("salt", "g", 5),
            row("flour", "g", 300),
            row("flour", "cup", 1),
        ])
        .unwrap();

        assert_eq!(
            items,
            vec![row("flour", "cup", 1), row("flour", "g", 500), row("salt", "g", 5)]
        );
    }

    #[test]
    fn test_render_format() {
        let text = render("alice", &[row("flour", "g", 500), row("egg", "pcs", 3)]);
        assert_eq!(
            text,
            "Shopping list for alice:\nflour g - 500\negg pcs - 3\n"
        );
        assert_eq!(filename("alice"), "alice_shopping_list.txt");
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let error = aggregate([row("flour", "g", i64::MAX), row("flour", "g", 1)]).unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::ValueOutOfRange);

        let items = aggregate([row("flour", "g", i64::MAX), row("salt", "g", 1)]).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(Vec::new()).unwrap().is_empty());
    }
}
