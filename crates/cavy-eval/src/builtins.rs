//! Root-environment built-in functions.
//!
//! `split`, `flip`, and `not` are vectorised: given an array they recurse
//! element-wise and rebuild the array; given a bare qubit they act directly.

pub const NAMES: &[&str] = &["qubit", "split", "flip", "not", "debug"];

/// The declared arity of a built-in, for [`crate::error::EvalError::ArityError`].
pub fn arity(name: &str) -> usize {
    match name {
        "qubit" => 0,
        "split" | "flip" | "not" | "debug" => 1,
        _ => unreachable!("unknown builtin '{name}'"),
    }
}
