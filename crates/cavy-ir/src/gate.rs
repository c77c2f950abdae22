//! The gate intermediate representation.
//!
//! The instruction set is fixed and small: a handful of one- and two-qubit
//! gates plus a terminal strong-measurement. There is no custom-gate
//! extension point and no gate-level parameter set, unlike a general-purpose
//! circuit IR; the language surface this crate backs never needs more than
//! this.

use crate::error::{IrError, IrResult};
use crate::qubit::Wire;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single instruction in a [`crate::circuit::Circuit`]'s gate log.
///
/// `T` carries an explicit `conjugated` flag rather than splitting into `T`
/// and `Tdg` variants, because conjugation needs to flip in place while a
/// gate moves through [`Gate::with_control`]'s Toffoli expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Pauli-X, backing the language's `~` unary operator and the `not`
    /// built-in.
    Not(Wire),
    /// Pauli-Z, a relative phase flip, backing the `flip` built-in.
    Z(Wire),
    /// The T gate (`pi/8` phase), self-adjoint up to the `conjugated` flag.
    T { wire: Wire, conjugated: bool },
    /// The Hadamard gate, backing the `split` built-in.
    Hadamard(Wire),
    /// Controlled-NOT.
    Cnot { control: Wire, target: Wire },
    /// A non-unitary, irreversible measurement collapsing `wire` to a
    /// classical bit.
    StrongMeasurement(Wire),
}

impl Gate {
    /// The wires this gate reads or writes, in a stable order.
    pub fn wires(&self) -> Vec<Wire> {
        match self {
            Gate::Not(w) | Gate::Z(w) | Gate::Hadamard(w) | Gate::StrongMeasurement(w) => vec![*w],
            Gate::T { wire, .. } => vec![*wire],
            Gate::Cnot { control, target } => vec![*control, *target],
        }
    }

    /// The inverse of this gate, for the uncompute half of a contravariant
    /// evaluation bracket.
    ///
    /// Every gate but measurement is self-inverse or inverts by flipping a
    /// phase flag; measurement is irreversible.
    pub fn conjugate(&self) -> IrResult<Gate> {
        match self {
            Gate::Not(w) => Ok(Gate::Not(*w)),
            Gate::Z(w) => Ok(Gate::Z(*w)),
            Gate::Hadamard(w) => Ok(Gate::Hadamard(*w)),
            Gate::Cnot { control, target } => Ok(Gate::Cnot {
                control: *control,
                target: *target,
            }),
            Gate::T { wire, conjugated } => Ok(Gate::T {
                wire: *wire,
                conjugated: !conjugated,
            }),
            Gate::StrongMeasurement(_) => Err(IrError::NotInvertible {
                gate: format!("{self:?}"),
                reason: "measurement collapses state and has no inverse",
            }),
        }
    }

    /// Rewrite this gate as it would be emitted were it controlled on `c`.
    ///
    /// Every variant but `Cnot` expands to a fixed, short sequence built from
    /// gates already in this instruction set; `Cnot` expands to a
    /// fifteen-gate Toffoli built from Hadamard, `T`/`Tdg`, and `Cnot` alone
    /// (no native three-qubit gate exists in this IR). `T`, `Hadamard`, and
    /// `StrongMeasurement` have no controlled form here and are refused.
    pub fn with_control(&self, c: Wire) -> IrResult<Vec<Gate>> {
        match self {
            Gate::Not(t) => Ok(vec![Gate::Cnot {
                control: c,
                target: *t,
            }]),
            Gate::Z(t) => Ok(vec![
                Gate::Hadamard(*t),
                Gate::Cnot {
                    control: c,
                    target: *t,
                },
                Gate::Hadamard(*t),
            ]),
            Gate::Cnot { control: a, target: b } => {
                let (a, b) = (*a, *b);
                Ok(vec![
                    Gate::Hadamard(b),
                    Gate::Cnot { control: a, target: b },
                    Gate::T { wire: b, conjugated: true },
                    Gate::Cnot { control: c, target: b },
                    Gate::T { wire: b, conjugated: false },
                    Gate::Cnot { control: a, target: b },
                    Gate::T { wire: b, conjugated: true },
                    Gate::Cnot { control: c, target: b },
                    Gate::T { wire: a, conjugated: false },
                    Gate::T { wire: b, conjugated: false },
                    Gate::Cnot { control: c, target: a },
                    Gate::Hadamard(b),
                    Gate::T { wire: c, conjugated: false },
                    Gate::T { wire: a, conjugated: true },
                    Gate::Cnot { control: c, target: a },
                ])
            }
            Gate::T { .. } => Err(IrError::NotControllable {
                gate: format!("{self:?}"),
                reason: "controlled-T has no fixed decomposition in this gate set",
            }),
            Gate::Hadamard(_) => Err(IrError::NotControllable {
                gate: format!("{self:?}"),
                reason: "controlled-Hadamard has no fixed decomposition in this gate set",
            }),
            Gate::StrongMeasurement(_) => Err(IrError::NotControllable {
                gate: format!("{self:?}"),
                reason: "measurement cannot be embedded under a control wire",
            }),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Not(w) => write!(f, "not {w}"),
            Gate::Z(w) => write!(f, "z {w}"),
            Gate::T { wire, conjugated } => {
                write!(f, "{} {wire}", if *conjugated { "tdg" } else { "t" })
            }
            Gate::Hadamard(w) => write!(f, "h {w}"),
            Gate::Cnot { control, target } => write!(f, "cnot {control} {target}"),
            Gate::StrongMeasurement(w) => write!(f, "measure {w}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_is_self_inverse() {
        let g = Gate::Not(Wire(0));
        assert_eq!(g.conjugate().unwrap(), g);
    }

    #[test]
    fn t_conjugate_flips_flag() {
        let g = Gate::T { wire: Wire(0), conjugated: false };
        assert_eq!(g.conjugate().unwrap(), Gate::T { wire: Wire(0), conjugated: true });
        assert_eq!(g.conjugate().unwrap().conjugate().unwrap(), g);
    }

    #[test]
    fn measurement_has_no_inverse() {
        assert!(Gate::StrongMeasurement(Wire(0)).conjugate().is_err());
    }

    #[test]
    fn controlled_not_is_cnot() {
        let g = Gate::Not(Wire(1));
        assert_eq!(g.with_control(Wire(0)).unwrap(), vec![Gate::Cnot { control: Wire(0), target: Wire(1) }]);
    }

    #[test]
    fn controlled_cnot_is_fifteen_gate_toffoli() {
        let g = Gate::Cnot { control: Wire(0), target: Wire(1) };
        let expanded = g.with_control(Wire(2)).unwrap();
        assert_eq!(expanded.len(), 15);
        assert_eq!(expanded[0], Gate::Hadamard(Wire(1)));
        assert_eq!(expanded[14], Gate::Cnot { control: Wire(2), target: Wire(0) });
    }

    #[test]
    fn hadamard_t_measurement_refuse_control() {
        assert!(Gate::Hadamard(Wire(0)).with_control(Wire(1)).is_err());
        assert!(Gate::T { wire: Wire(0), conjugated: false }.with_control(Wire(1)).is_err());
        assert!(Gate::StrongMeasurement(Wire(0)).with_control(Wire(1)).is_err());
    }
}
