use thiserror::Error;

/// The only failure the fetch client reports. The cause is logged where it happens and
/// deliberately not carried to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to fetch movies")]
pub struct FetchFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error(transparent)]
    FetchFailure(#[from] FetchFailure),
}
