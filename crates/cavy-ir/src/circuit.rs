//! The circuit: an ordered gate log plus a name-to-wire side table.
//!
//! Unlike a scheduling- or optimization-oriented IR, this `Circuit` is
//! deliberately not a DAG. Gates are appended in the exact order the
//! evaluator emits them and are never reordered, deduplicated, or
//! canceled; circuit-level optimization is out of scope here; a backend
//! consumes the gate log as written.

use crate::gate::Gate;
use crate::qubit::Wire;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An ordered gate log together with a map from source-level names to the
/// wires that back them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Circuit {
    gates: Vec<Gate>,
    qubit_labels: FxHashMap<String, Wire>,
}

impl Circuit {
    /// An empty circuit with no gates and no labeled wires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a gate to the log. Gates are never reordered or merged once
    /// appended.
    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Append every gate in `gates`, in order.
    pub fn extend(&mut self, gates: impl IntoIterator<Item = Gate>) {
        self.gates.extend(gates);
    }

    /// Record that source-level name `name` denotes `wire`.
    ///
    /// A name may be rebound to a different wire over the circuit's
    /// lifetime (e.g. a variable reassigned in a loop body); the label table
    /// always reflects the most recent binding.
    pub fn label(&mut self, name: impl Into<String>, wire: Wire) {
        self.qubit_labels.insert(name.into(), wire);
    }

    /// The wire currently labeled `name`, if any.
    pub fn wire_for(&self, name: &str) -> Option<Wire> {
        self.qubit_labels.get(name).copied()
    }

    /// The gate log, in emission order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// The name-to-wire side table.
    pub fn qubit_labels(&self) -> &FxHashMap<String, Wire> {
        &self.qubit_labels
    }

    /// Number of gates logged so far.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the gate log is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The highest wire index referenced by any gate, or `None` if the
    /// circuit has no gates.
    pub fn max_wire(&self) -> Option<Wire> {
        self.gates.iter().flat_map(Gate::wires).max()
    }
}
