//! Crate-wide error kinds (spec §7).
//!
//! Every fallible public operation returns [`MimirError`] or converts a
//! component-local error into it. Structural errors (`InvariantViolation`,
//! `MalformedInput`) are never recovered locally; only `Cancelled` and
//! `OutOfBudget` are caught by the search kernel.

use thiserror::Error;

/// The error kinds recognized by the core (spec §7).
#[derive(Debug, Error)]
pub enum MimirError {
    /// A sorted-list or canonicalization invariant was broken. Always a
    /// programming error; fatal.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Search exhausted the open list without finding a plan. Not an error
    /// condition from the caller's perspective, but a normal result kind.
    #[error("search exhausted without finding a plan")]
    Exhaustion,

    /// The static goal-reachability check failed before search began.
    #[error("problem is statically unsolvable")]
    Unsolvable,

    /// A time or memory budget was exceeded.
    #[error("budget exceeded: {0}")]
    OutOfBudget(String),

    /// A Swiss-table rehash could not fit the migrated data because
    /// structural sharing changed during migration, and no larger retry
    /// capacity was configured.
    #[error("hash table rehash capacity underflow after {attempts} attempts")]
    CapacityUnderflow {
        /// Number of rehash factor escalations attempted before giving up.
        attempts: usize,
    },

    /// The parser-layer AST handed to the translators was malformed.
    /// Never recovered locally — surfaced to the caller unchanged.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Cooperative cancellation requested by the caller.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<crate::flatter::LayoutError> for MimirError {
    fn from(e: crate::flatter::LayoutError) -> Self {
        MimirError::InvariantViolation(e.to_string())
    }
}

impl From<crate::valla::VallaError> for MimirError {
    fn from(e: crate::valla::VallaError) -> Self {
        match e {
            crate::valla::VallaError::CapacityUnderflow { attempts } => {
                MimirError::CapacityUnderflow { attempts }
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type MimirResult<T> = Result<T, MimirError>;
