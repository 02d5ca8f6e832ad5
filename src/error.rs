//! Errors raised by overlay elements and state persistence

use std::num::ParseIntError;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("cannot update point {0}: a line only has points 0 (start) and 1 (end)")]
    InvalidPointIndex(usize),
    #[error("expected {expected} coordinates, found {found}")]
    WrongTokenCount { expected: usize, found: usize },
    #[error("invalid coordinate {token:?}: {source}")]
    InvalidCoordinate {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("malformed element #{index}: {source}")]
    MalformedElement {
        index: usize,
        #[source]
        source: Box<OverlayError>,
    },
}

pub type Result<T, E = OverlayError> = std::result::Result<T, E>;
