// ABOUTME: Reference data import commands for foodapi-cli
// ABOUTME: Loads ingredient and tag JSON files through the catalog repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodapi_server::{
    config::ServerConfig,
    constants::data_files,
    database::{repositories::CatalogRepositoryImpl, Database},
    errors::AppResult,
    models::ImportReport,
    services::data_loader,
};
use tracing::info;

/// Import ingredients
pub async fn ingredients(
    database: &Database,
    config: &ServerConfig,
    file: Option<&str>,
) -> AppResult<()> {
    let path = config.data_file(file.unwrap_or(data_files::INGREDIENTS));
    info!("Loading ingredients from {}", path.display());

    let catalog = CatalogRepositoryImpl::new(database.clone());
    let report = data_loader::load_ingredients(&catalog, &path).await?;
    print_report("ingredients", &report);
    Ok(())
}

/// Import tags
pub async fn tags(database: &Database, config: &ServerConfig, file: Option<&str>) -> AppResult<()> {
    let path = config.data_file(file.unwrap_or(data_files::TAGS));
    info!("Loading tags from {}", path.display());

    let catalog = CatalogRepositoryImpl::new(database.clone());
    let report = data_loader::load_tags(&catalog, &path).await?;
    print_report("tags", &report);
    Ok(())
}

fn print_report(label: &str, report: &ImportReport) {
    println!(
        "Loaded {label}: {} created, {} skipped",
        report.created, report.skipped
    );
}
