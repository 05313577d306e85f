//! Error types used across the crate.

/// Result alias for `versatility`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the consensus and versatility primitives.
///
/// Every variant is fatal to the call that produced it: there is no internal
/// retry and no partial result is kept. Callers may retry at a higher level,
/// e.g. by re-running a whole sweep.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A numeric parameter was outside its valid range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What the parameter must satisfy.
        message: &'static str,
    },

    /// A consensus matrix was requested for a graph with no vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// A community-detection run returned a malformed partition.
    #[error("partition contract violated: {0}")]
    ContractViolation(String),

    /// A computed matrix failed a required structural property.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
