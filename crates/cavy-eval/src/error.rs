//! Evaluator error kinds.

use cavy_ir::IrError;
use thiserror::Error;

/// Errors the evaluator can raise. Lexical and syntactic errors live in
/// `cavy-syntax` and are accumulated rather than raised; everything here is
/// fatal to the current top-level statement and is surfaced to the driver.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("unbound name '{0}'")]
    UnboundName(String),

    #[error("value '{0}' has already been moved")]
    MovedValue(String),

    #[error("type error: {0}")]
    TypeError(String),

    #[error("expected {expected} argument(s), got {actual}")]
    ArityError { expected: usize, actual: usize },

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("circuit error: {0}")]
    Ir(#[from] IrError),
}

pub type EvalResult<T> = Result<T, EvalError>;
