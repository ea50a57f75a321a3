//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Expected, client-triggerable absences (unknown game, full game, move by
/// a non-participant) are `Option::None` at the entity APIs, not errors.
/// This type covers infrastructure failures only.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The entity's worker task is no longer reachable.
    #[error("entity mailbox closed")]
    EntityUnavailable,

    /// Any other infrastructure failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
