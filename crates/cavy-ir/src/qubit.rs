//! Wire identifiers.
//!
//! A [`Wire`] names one qubit line through a [`crate::circuit::Circuit`]. Wires
//! are allocated in strictly increasing order by the evaluator's allocator and
//! are never reused, so a `Wire` also doubles as a timestamp of allocation
//! order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An index into a circuit's qubit wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wire(pub usize);

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for Wire {
    fn from(id: usize) -> Self {
        Wire(id)
    }
}

impl From<Wire> for usize {
    fn from(w: Wire) -> Self {
        w.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        let w = Wire(0);
        assert_eq!(format!("{w}"), "q0");
    }

    #[test]
    fn test_wire_ordering() {
        assert!(Wire(1) > Wire(0));
    }
}
