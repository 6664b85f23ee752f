//! Core types for the search domain.

use std::time::Duration;

use serde::Serialize;

use super::traits::{PaginatedResult, SearchParams};

/// Configuration for search request normalization.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Limit used when the request has none, or a non-positive one
    pub default_limit: i64,
    /// Upper bound for the page size
    pub max_limit: i64,
    /// Minimum trimmed query length, in characters
    pub min_query_length: usize,
    /// Maximum trimmed query length, in characters
    pub max_query_length: usize,
    /// Maximum length of the free-text company filter
    pub max_company_length: usize,
    /// Deadline for the execution stage of one invocation
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            min_query_length: 2,
            max_query_length: 100,
            max_company_length: 100,
            timeout: Duration::from_secs(5),
        }
    }
}

impl SearchConfig {
    /// Resolve a requested limit: absent or non-positive falls back to the
    /// default, anything above the maximum is capped.
    pub fn resolve_limit(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(limit) if limit > 0 => limit.min(self.max_limit),
            _ => self.default_limit,
        }
    }

    /// Resolve a requested offset, never below zero.
    pub fn resolve_offset(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(0).max(0)
    }
}

/// One page of search results plus the size of the whole matching set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

impl<T> PaginatedResult for Page<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn total(&self) -> i64 {
        self.total
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Successful search payload.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationDetails {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PaginationDetails {
    /// `has_more` is derived from the authoritative total, not from whether
    /// the page happened to be full.
    pub fn new(total: i64, limit: i64, offset: i64, returned: usize) -> Self {
        let returned = i64::try_from(returned).unwrap_or(i64::MAX);
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(returned) < total,
        }
    }
}

impl<T> SearchResponse<T> {
    /// Build the response for a result page, preserving item order.
    pub fn from_page<R, P>(result: R, params: &P) -> Self
    where
        R: PaginatedResult<Item = T>,
        P: SearchParams,
    {
        let pagination = PaginationDetails::new(
            result.total(),
            params.limit(),
            params.offset(),
            result.items().len(),
        );
        let data = result.into_items();
        Self { data, pagination }
    }
}

/// Error payload: `{ "error": { "code", "message", "details" } }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
