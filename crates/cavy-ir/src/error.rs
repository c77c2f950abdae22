//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while transforming or embedding a [`crate::gate::Gate`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum IrError {
    /// The gate has no inverse and cannot appear in a contravariant (uncompute)
    /// context.
    #[error("gate '{gate}' is not invertible: {reason}")]
    NotInvertible {
        /// Debug rendering of the offending gate.
        gate: String,
        /// Why the gate cannot be conjugated.
        reason: &'static str,
    },

    /// The gate has no fixed controlled-embedding rule in the IR's gate set.
    #[error("gate '{gate}' cannot be controlled: {reason}")]
    NotControllable {
        /// Debug rendering of the offending gate.
        gate: String,
        /// Why the gate cannot be embedded under a control wire.
        reason: &'static str,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
