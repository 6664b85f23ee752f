//! Generic paginated search over Postgres full-text indexes.
//!
//! A search invocation flows through one [`SearchPipeline`]:
//!
//! 1. **Parse** the raw query string into a resource-specific request
//! 2. **Validate** it, collecting every violation
//! 3. **Convert** it into a typed filter value object ([`SearchParams`])
//! 4. **Execute** it through a [`SearchService`] (ranked page + total, then
//!    batch-fetched associations)
//! 5. **Assemble** the [`SearchResponse`] with pagination metadata
//!
//! Any failure short-circuits into a [`SearchError`], which the HTTP layer
//! maps to an error payload.
//!
//! # Example
//!
//! ```ignore
//! let service = JobSearchService::new(job_repo, technology_repo);
//! let pipeline: SearchPipeline<JobSearchRequest, _> =
//!     SearchPipeline::new(service, SearchConfig::default());
//!
//! let response = pipeline.handle(&uri, CancellationToken::new()).await?;
//! println!("{} of {}", response.data.len(), response.pagination.total);
//! ```
//!
//! SQL for the filter stage is accumulated with [`PredicateBuilder`], which
//! owns the positional placeholder counter so predicates and pagination can
//! never disagree on parameter indices.

mod error;
mod pipeline;
mod predicate;
mod traits;
mod types;

pub use error::SearchError;
pub use pipeline::{run_cancellable, SearchPipeline};
pub use predicate::{BindValue, PredicateBuilder};
pub use traits::{Convertible, SearchParams, SearchService, Validatable};
pub use types::{ErrorDetails, ErrorResponse, Page, SearchConfig, SearchResponse};
