// ABOUTME: Page-number pagination with a client-adjustable page size
// ABOUTME: Provides PageParams for query resolution and Page<T> for list responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Resolved pagination request (1-based page number and page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
}

impl PageParams {
    /// Resolve raw `page`/`limit` query values against configured bounds
    ///
    /// A missing or zero `limit` falls back to `default_limit`; a larger one is
    /// clamped to `max_limit`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for page `0`, matching out-of-range pages.
    pub fn resolve(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::not_found("Page"));
        }

        let limit = match limit {
            None | Some(0) => default_limit,
            Some(requested) => requested.min(max_limit),
        }
        .max(1);

        Ok(Self { page, limit })
    }

    /// Number of rows to skip
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Limit as a SQL bind value
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Reject pages past the end of a non-empty result set
    ///
    /// Page 1 is always valid, even when there are no rows.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the page starts beyond `count`.
    pub fn ensure_in_range(&self, count: i64) -> AppResult<()> {
        if self.page > 1 && self.offset() >= count {
            return Err(AppError::not_found(format!("Page {}", self.page)));
        }
        Ok(())
    }
}

/// One page of a paginated list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: i64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page, generating `next`/`previous` through `link`
    ///
    /// `link` receives the target page number and returns its URL.
    pub fn new(results: Vec<T>, count: i64, params: PageParams, link: impl Fn(u32) -> String) -> Self {
        let shown = params.offset() + results.len() as i64;
        let next = (shown < count).then(|| link(params.page + 1));
        let previous = (params.page > 1).then(|| link(params.page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(page: u32) -> String {
        format!("/items/?page={page}")
    }

    #[test]
    fn test_resolve_defaults_and_clamps() {
        let params = PageParams::resolve(None, None, 6, 100).unwrap();
        assert_eq!(params, PageParams { page: 1, limit: 6 });

        let params = PageParams::resolve(Some(3), Some(500), 6, 100).unwrap();
        assert_eq!(params.limit, 100);
        assert_eq!(params.offset(), 200);

        let params = PageParams::resolve(None, Some(0), 6, 100).unwrap();
        assert_eq!(params.limit, 6);
    }

    #[test]
    fn test_page_zero_is_not_found() {
        let error = PageParams::resolve(Some(0), None, 6, 100).unwrap_err();
        assert_eq!(error.http_status(), 404);
    }

    #[test]
    fn test_links_on_middle_page() {
        let params = PageParams::resolve(Some(2), Some(2), 6, 100).unwrap();
        let page = Page::new(vec![3, 4], 5, params, link);

        assert_eq!(page.next.as_deref(), Some("/items/?page=3"));
        assert_eq!(page.previous.as_deref(), Some("/items/?page=1"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let params = PageParams::resolve(Some(3), Some(2), 6, 100).unwrap();
        let page = Page::new(vec![5], 5, params, link);

        assert!(page.next.is_none());
        assert!(params.ensure_in_range(5).is_ok());
        let past_end = PageParams::resolve(Some(4), Some(2), 6, 100).unwrap();
        assert!(past_end.ensure_in_range(5).is_err());
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let params = PageParams::resolve(None, None, 6, 100).unwrap();
        assert!(params.ensure_in_range(0).is_ok());

        let page: Page<i32> = Page::new(Vec::new(), 0, params, link);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }
}
