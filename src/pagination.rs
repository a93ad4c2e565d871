// ABOUTME: Re-exports pagination types from foodapi-core and builds page links
// ABOUTME: Page links are relative URLs that keep every other query parameter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use foodapi_core::pagination::*;

use http::Uri;
use url::form_urlencoded;

/// Build the relative URL of `page` for the request `uri`
///
/// The `page` parameter is replaced (dropped entirely for page 1); all other
/// parameters, including repeated keys, are preserved in order.
#[must_use]
pub fn page_link(uri: &Uri, page: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(query) = uri.query() {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key != "page" {
                serializer.append_pair(&key, &value);
            }
        }
    }
    if page > 1 {
        serializer.append_pair("page", &page.to_string());
    }

    let query = serializer.finish();
    if query.is_empty() {
        uri.path().to_owned()
    } else {
        format!("{}?{query}", uri.path())
    }
}
