// ABOUTME: Bulk import of ingredient and tag reference data from JSON files
// ABOUTME: Skips records that already exist and aborts on any other storage error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::constants::limits::{MAX_NAME_LENGTH, MAX_UNIT_LENGTH};
use crate::database::repositories::CatalogRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{ImportReport, NewIngredient, NewTag};

fn hex_color_regex() -> Option<&'static Regex> {
    static HEX_COLOR_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    HEX_COLOR_REGEX
        .get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok())
        .as_ref()
}

/// Read and parse a JSON array of records
///
/// # Errors
///
/// Returns `ConfigMissing` if the file does not exist, `ConfigError` if it
/// cannot be read, or `SerializationError` if it is not the expected JSON
async fn read_records<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::config_missing(format!(
                "Data file {} does not exist, check the data directory",
                path.display()
            ))
        } else {
            AppError::config(format!("Failed to read {}: {e}", path.display()))
        }
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::serialization(format!("Invalid data file {}: {e}", path.display()))
    })
}

/// Count one insert outcome, skipping duplicates
fn tally<T>(report: &mut ImportReport, outcome: AppResult<T>, label: &str) -> AppResult<()> {
    match outcome {
        Ok(_) => {
            report.created += 1;
            Ok(())
        }
        Err(e) if e.is_already_exists() => {
            warn!("{label} already exists, skipping");
            report.skipped += 1;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Import ingredients from a JSON array of `{name, measurement_unit}`
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, a name or unit is
/// out of bounds, or on any storage error other than a duplicate
pub async fn load_ingredients(
    catalog: &dyn CatalogRepository,
    path: &Path,
) -> AppResult<ImportReport> {
    let records: Vec<NewIngredient> = read_records(path).await?;
    if let Some(bad) = records.iter().find(|ingredient| {
        ingredient.name.trim().is_empty()
            || ingredient.name.chars().count() > MAX_NAME_LENGTH
            || ingredient.measurement_unit.chars().count() > MAX_UNIT_LENGTH
    }) {
        return Err(AppError::validation(
            "name",
            format!("Ingredient '{}' has an invalid name or unit", bad.name),
        ));
    }
    info!("Importing {} ingredients from {}", records.len(), path.display());

    let mut report = ImportReport::default();
    for record in &records {
        let label = format!("Ingredient '{}' ({})", record.name, record.measurement_unit);
        tally(&mut report, catalog.create_ingredient(record).await, &label)?;
    }

    info!(
        created = report.created,
        skipped = report.skipped,
        "Ingredient import finished"
    );
    Ok(report)
}

/// Import tags from a JSON array of `{name, color, slug}`
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, a color is not
/// `#RRGGBB`, or on any storage error other than a duplicate
pub async fn load_tags(catalog: &dyn CatalogRepository, path: &Path) -> AppResult<ImportReport> {
    let records: Vec<NewTag> = read_records(path).await?;
    let color_pattern =
        hex_color_regex().ok_or_else(|| AppError::internal("Color pattern failed to compile"))?;

    if let Some(bad) = records.iter().find(|tag| !color_pattern.is_match(&tag.color)) {
        return Err(AppError::validation(
            "color",
            format!("Tag '{}' has invalid color '{}'", bad.slug, bad.color),
        ));
    }
    info!("Importing {} tags from {}", records.len(), path.display());

    let mut report = ImportReport::default();
    for record in &records {
        let label = format!("Tag '{}'", record.slug);
        tally(&mut report, catalog.create_tag(record).await, &label)?;
    }

    info!(
        created = report.created,
        skipped = report.skipped,
        "Tag import finished"
    );
    Ok(report)
}
