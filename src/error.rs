//! Error types shared across the planner.

use thiserror::Error;

/// A distance matrix that cannot be solved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidMatrixError {
    #[error("distance matrix is empty")]
    Empty,
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("negative cost {value} at [{row}][{col}]")]
    NegativeCost { row: usize, col: usize, value: f64 },
    #[error("non-finite cost at [{row}][{col}]")]
    NonFiniteCost { row: usize, col: usize },
    #[error("diagonal entry [{index}][{index}] is {value}, expected 0")]
    NonZeroDiagonal { index: usize, value: f64 },
}

/// Failure of an external routing collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts.
    #[error("routing engine request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The engine answered with a non-success HTTP status.
    #[error("routing engine returned HTTP {0}")]
    Status(u16),
    /// The engine answered but could not route the request.
    #[error("routing engine could not route request: {code}")]
    NoRoute { code: String },
    /// The response does not match the requested locations.
    #[error("malformed routing response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(_) => true,
            ProviderError::Status(status) => *status == 429 || *status >= 500,
            ProviderError::NoRoute { .. } | ProviderError::Malformed(_) => false,
        }
    }
}

impl From<InvalidMatrixError> for ProviderError {
    fn from(err: InvalidMatrixError) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Why a route could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("depot has no usable coordinates")]
    MissingDepotCoordinates,
    #[error("{valid} stop(s) with coordinates, at least {required} needed to optimize")]
    InsufficientStops { valid: usize, required: usize },
    #[error("distance provider failed: {0}")]
    DistanceProvider(#[from] ProviderError),
    #[error("route optimization was cancelled")]
    Cancelled,
}

impl BuildError {
    /// Precondition outcomes ("nothing to optimize") rather than faults.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            BuildError::MissingDepotCoordinates | BuildError::InsufficientStops { .. }
        )
    }
}

/// Failure of the optimization workflow around the builder.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no warehouse with coordinates for this route")]
    NoDepot,
    #[error("courier already has an optimization in this batch")]
    DuplicateCourier,
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl DispatchError {
    pub fn is_informational(&self) -> bool {
        match self {
            DispatchError::NoDepot | DispatchError::DuplicateCourier => false,
            DispatchError::Build(err) => err.is_informational(),
        }
    }
}

/// No session entry matches the requested courier and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no optimized route available")]
pub struct RouteNotFound;
