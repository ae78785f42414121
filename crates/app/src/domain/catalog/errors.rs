//! Catalog service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// Absent skus are reported as empty results, not as errors, so the
    /// only failure the catalog can surface is its storage.
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
