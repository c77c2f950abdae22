//! Cavy Circuit Intermediate Representation
//!
//! This crate provides the gate-level data structures the evaluator targets:
//! a fixed instruction set ([`Gate`]) and an ordered gate log with a
//! name-to-wire side table ([`Circuit`]). There is no DAG, no scheduling, and
//! no optimization pass; the evaluator emits gates directly into the log in
//! the order the program executes them.
//!
//! # Core Components
//!
//! - **Wires**: [`Wire`] addresses a single qubit line.
//! - **Gates**: [`Gate`] is the closed set of instructions this IR supports;
//!   it knows how to invert itself ([`Gate::conjugate`]) and how to rewrite
//!   itself under an extra control wire ([`Gate::with_control`]).
//! - **Circuit**: [`Circuit`] is the append-only gate log plus label table.
//!
//! # Example
//!
//! ```rust
//! use cavy_ir::{Circuit, Gate, Wire};
//!
//! let mut circuit = Circuit::new();
//! let q = Wire(0);
//! let r = Wire(1);
//! circuit.label("q", q);
//! circuit.label("r", r);
//! circuit.push(Gate::Not(q));
//! circuit.push(Gate::Cnot { control: q, target: r });
//!
//! assert_eq!(circuit.gates().len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use qubit::Wire;
