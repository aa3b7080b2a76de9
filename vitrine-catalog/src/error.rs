/// Catalog-domain errors
///
/// Every failure here is a deterministic function of the input; nothing is
/// retryable and nothing is swallowed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
