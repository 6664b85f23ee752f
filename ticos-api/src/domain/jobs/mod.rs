//! Job postings as a searchable resource.
//!
//! [`JobSearchRequest`] is bound from the query string and converted into
//! `JobSearchParams`. [`JobSearchService`] runs the ranked search, then
//! fetches technologies for the whole page in one batch and assembles
//! [`JobResponse`]s in search order.

mod assembler;
mod repository;
mod request;
mod service;
mod traits;
mod types;

pub use assembler::JobResponse;
pub use repository::{PgJobRepository, PgJobTechnologyRepository};
pub use request::JobSearchRequest;
pub use service::JobSearchService;

use crate::domain::search::SearchPipeline;

/// The job search pipeline as wired in production.
pub type JobSearchPipeline = SearchPipeline<
    JobSearchRequest,
    JobSearchService<PgJobRepository, PgJobTechnologyRepository>,
>;
