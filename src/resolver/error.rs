use thiserror::Error;

/// Failure of a single source attempt.
///
/// None of these cross the resolver boundary: every variant means "advance
/// to the next source in the chain". The caller of `resolve` only ever sees
/// a record, or an explicit absence for artifact-backed categories.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source could not be reached at all (network down, missing file or
    /// directory, non-success HTTP status)
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Source answered, but the data does not match the expected schema
    #[error("malformed source data: {0}")]
    Malformed(String),

    /// Unexpected failure inside normalization
    #[error("internal fault: {0}")]
    Internal(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
