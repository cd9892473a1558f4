use crate::analyzers::outcome::ScanResult;
use crate::data_retrieval::api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuoError {
    #[error("no player name given")]
    EmptyInput,
    #[error("player {0} not found")]
    NotFound(String),
    #[error("{requested} is not a positive multiple of {page_size}")]
    InvalidIterationCount { requested: usize, page_size: usize },
    #[error("upstream failure: {0}")]
    UpstreamError(#[source] ApiError),
    #[error("scan interrupted after {} matches: {source}", .partial.scanned)]
    ScanInterrupted {
        partial: ScanResult,
        #[source]
        source: ApiError,
    },
    #[error("resolved {resolved} duos out of {expected} names")]
    DuoCountMismatch { expected: usize, resolved: usize },
}
