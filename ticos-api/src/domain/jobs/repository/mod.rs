//! Job search repository implementations.

#[cfg(test)]
mod mock;
mod postgres;

#[cfg(test)]
pub use mock::MockJobRepository;
pub use postgres::{PgJobRepository, PgJobTechnologyRepository};
