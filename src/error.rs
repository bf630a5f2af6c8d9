use thiserror::Error;

/// Failure reported by a [`Comparator`](crate::Comparator) while ordering two keys.
///
/// # Examples
/// ```rust
/// use sorted_map::ComparisonError;
///
/// let err = ComparisonError::new("NaN is not ordered");
/// assert_eq!(err.to_string(), "NaN is not ordered");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ComparisonError {
    message: String,
}

impl ComparisonError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by [`SortedMap`](crate::SortedMap) operations.
///
/// Every error aborts only the call that produced it, the map stays sorted
/// and usable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup, pop or remove of an absent key without a default.
    #[error("key not found")]
    KeyNotFound,

    /// Malformed call shape, e.g. wrong argument count for `get_varargs`.
    #[error("{0}")]
    Usage(String),

    /// The key ordering predicate failed.
    #[error("key comparison failed: {0}")]
    Comparison(#[from] ComparisonError),

    /// The map was mutated from inside the comparator while a search was running.
    #[error("map was modified during key search")]
    Modified,

    /// The map is lent out (traversal, key or value clone) and cannot be mutated.
    #[error("map is borrowed and cannot be mutated right now")]
    Busy,
}

pub type Result<T> = std::result::Result<T, Error>;
