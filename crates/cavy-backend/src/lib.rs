//! Sampling backends for Cavy circuits.
//!
//! The core language crates ([`cavy_ir`], `cavy-syntax`, `cavy-eval`) never
//! run a circuit; they only build one. A backend is anything that can
//! repeatedly sample a built [`cavy_ir::Circuit`] and report the labelled
//! wires' outcomes, via [`Backend::sample_circuit`]. This crate defines that
//! trait and ships one reference implementation, [`LocalSimulator`], which
//! simulates the circuit exactly.
//!
//! ```
//! use cavy_backend::{Backend, LocalSimulator};
//! use cavy_ir::{Circuit, Gate, Wire};
//!
//! let mut circuit = Circuit::new();
//! circuit.push(Gate::Hadamard(Wire(0)));
//! circuit.push(Gate::StrongMeasurement(Wire(0)));
//! circuit.label("c", Wire(0));
//!
//! let sample = LocalSimulator::new().sample_circuit(&circuit, 100).unwrap();
//! assert_eq!(sample.len(), 100);
//! ```

pub mod backend;
pub mod error;
pub mod local_simulator;
pub mod sample;

pub use backend::Backend;
pub use error::{BackendError, BackendResult};
pub use local_simulator::LocalSimulator;
pub use sample::{Sample, Shot};
