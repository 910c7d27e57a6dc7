//! Error types for date-buckets operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BucketError {
    /// The phrase carries no alphabetic content at all (e.g. `"50"`, `""`).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An `<N>_<unit>_ago` phrase with the wrong shape.
    #[error("Invalid date value: {0}")]
    InvalidDateValue(String),

    /// An interval spec with more than two `_`-separated segments.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// No grammar rule produced both a cadence and a bucket.
    #[error("Unresolved cadence or bucket: {0}")]
    UnresolvedPhrase(String),

    #[error("Unsupported time bucket: {0}")]
    UnsupportedBucket(String),

    #[error("Invalid cadence: {0}")]
    InvalidCadence(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, BucketError>;
