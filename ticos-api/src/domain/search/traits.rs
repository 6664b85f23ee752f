//! Trait definitions for the generic search pipeline.
//!
//! A searchable resource plugs into [`super::SearchPipeline`] by providing a
//! request type (validated and converted here) and a [`SearchService`].

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio_util::sync::CancellationToken;

use super::error::SearchError;
use super::types::{Page, SearchConfig};

/// Semantic validation of a bound request.
pub trait Validatable {
    /// Check every rule and return all violations, not just the first.
    fn validate(&self, config: &SearchConfig) -> Result<(), Vec<String>>;
}

/// Conversion of a validated request into its filter value object.
pub trait Convertible {
    type Params: SearchParams;

    fn to_search_params(&self, config: &SearchConfig) -> Result<Self::Params, SearchError>;
}

/// A wire-level request that can be bound from a query string.
pub trait SearchRequest: Validatable + Convertible + DeserializeOwned + Send {}

impl<T> SearchRequest for T where T: Validatable + Convertible + DeserializeOwned + Send {}

/// Normalized search parameters with resolved pagination.
pub trait SearchParams: Send + Sync {
    fn limit(&self) -> i64;
    fn offset(&self) -> i64;
}

/// Result of the execution stage: an ordered page and the total match count.
pub trait PaginatedResult {
    type Item;

    fn items(&self) -> &[Self::Item];
    fn total(&self) -> i64;
    fn into_items(self) -> Vec<Self::Item>;
}

/// Resource-specific execution: ranked search plus association fetch.
#[async_trait]
pub trait SearchService<P>: Send + Sync
where
    P: SearchParams,
{
    type Item: Serialize + Send;

    /// Execute the search for `params`.
    ///
    /// Must honor `cancel`: once it fires, the call resolves to
    /// [`SearchError::Cancelled`] and no partial page is returned.
    async fn execute_search(
        &self,
        params: &P,
        cancel: &CancellationToken,
    ) -> Result<Page<Self::Item>, SearchError>;
}
