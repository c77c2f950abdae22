//! Tree-walking evaluator for Cavy programs, lowering straight to a
//! [`cavy_ir::Circuit`].
//!
//! ```
//! use cavy_eval::Evaluator;
//!
//! let (stmts, errors) = cavy_syntax::parse("q <- ?true; print q;");
//! assert!(errors.is_empty());
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.run(&stmts).unwrap();
//! assert_eq!(evaluator.circuit.len(), 1);
//! ```

mod builtins;
mod environment;
mod error;
mod evaluator;
mod value;

pub use environment::{EnvRef, Environment};
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use value::{Discipline, UserFunction, Value};
