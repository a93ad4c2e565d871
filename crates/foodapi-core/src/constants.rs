// ABOUTME: Application-wide limits and defaults for the recipe-sharing backend
// ABOUTME: Field length limits, pagination bounds, and shopping-list file naming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Field and value limits enforced before anything reaches storage
pub mod limits {
    /// Maximum length of recipe, ingredient, and tag names
    pub const MAX_NAME_LENGTH: usize = 200;

    /// Maximum length of a measurement unit
    pub const MAX_UNIT_LENGTH: usize = 200;

    /// Minimum cooking time in minutes
    pub const MIN_COOKING_TIME: i64 = 1;

    /// Maximum cooking time in minutes (32-bit integer range)
    pub const MAX_COOKING_TIME: i64 = 2_147_483_647;

    /// Minimum amount of a single ingredient within a recipe
    pub const MIN_INGREDIENT_AMOUNT: i64 = 1;

    /// Maximum amount of a single ingredient within a recipe (32-bit integer range)
    pub const MAX_INGREDIENT_AMOUNT: i64 = 2_147_483_647;
}

/// Pagination defaults
pub mod pagination {
    /// Page size used when the client does not pass `limit`
    pub const DEFAULT_PAGE_SIZE: u32 = 6;

    /// Upper bound for a client-supplied `limit`
    pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Tag defaults
pub mod tags {
    /// Color assigned to tags imported without one
    pub const DEFAULT_COLOR: &str = "#ffffff";
}

/// Shopping-list export naming
pub mod shopping_list {
    /// Suffix appended to the username to build the attachment filename
    pub const FILENAME_SUFFIX: &str = "_shopping_list.txt";

    /// Content type of the exported list
    pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";
}

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP server
    pub const FOODAPI_SERVER: &str = "foodapi-server";
}

/// Reference data import files
pub mod data_files {
    /// Default ingredient file name, resolved against `DATA_DIR`
    pub const INGREDIENTS: &str = "ingredients.json";

    /// Default tag file name, resolved against `DATA_DIR`
    pub const TAGS: &str = "tags.json";
}
