//! Lexically nested scopes.
//!
//! An [`Environment`] tree models three things at once: classical
//! name-to-value binding with move semantics on linear values, a
//! process-local monotonic qubit allocator shared by every scope in a given
//! evaluation, and the optional control wire that a scope's enclosing `if`
//! installed.
//!
//! Every operation takes the scope to start searching from as an explicit
//! `&EnvRef` and walks the parent chain itself, rather than being a method
//! that implicitly recurses through `self.parent` while holding a borrow —
//! that would deadlock against `RefCell`.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use cavy_ir::{Gate, Wire};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A value binding, or the sigil left behind once a linear value has been
/// read.
#[derive(Debug, Clone)]
enum Slot {
    Bound(Value),
    Moved,
}

/// A scope: an owning-parent pointer (`None` at the root), a values map, a
/// shared qubit allocator, and an optional control wire.
#[derive(Debug)]
pub struct Environment {
    parent: Option<EnvRef>,
    values: HashMap<String, Slot>,
    qubit_alloc: Rc<Cell<usize>>,
    control: Option<Wire>,
}

/// A shared, mutable handle to an [`Environment`]; scopes are reference
/// counted because closures capture their defining environment.
pub type EnvRef = Rc<RefCell<Environment>>;

impl Environment {
    /// A fresh root scope with no parent and a qubit allocator starting at 0.
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            parent: None,
            values: HashMap::new(),
            qubit_alloc: Rc::new(Cell::new(0)),
            control: None,
        }))
    }

    /// A child scope of `parent`, sharing its qubit allocator and carrying
    /// no control wire of its own.
    pub fn child(parent: &EnvRef) -> EnvRef {
        let qubit_alloc = Rc::clone(&parent.borrow().qubit_alloc);
        Rc::new(RefCell::new(Environment {
            parent: Some(Rc::clone(parent)),
            values: HashMap::new(),
            qubit_alloc,
            control: None,
        }))
    }

    /// A child scope of `parent` whose own gate emissions (and those of its
    /// descendants) are controlled on `control`.
    pub fn child_with_control(parent: &EnvRef, control: Wire) -> EnvRef {
        let env = Self::child(parent);
        env.borrow_mut().control = Some(control);
        env
    }

    /// Search `env` then its enclosing chain for `name`. If found and its
    /// discipline is `Linear` or higher, replace the binding with the moved
    /// sigil and return the original value. A second call on the same
    /// binding fails with [`EvalError::MovedValue`].
    pub fn get(env: &EnvRef, name: &str) -> EvalResult<Value> {
        {
            let mut this = env.borrow_mut();
            if let Some(slot) = this.values.get_mut(name) {
                return match slot {
                    Slot::Moved => Err(EvalError::MovedValue(name.to_string())),
                    Slot::Bound(value) => {
                        let value = value.clone();
                        if value.discipline() >= crate::value::Discipline::Linear {
                            *slot = Slot::Moved;
                        }
                        Ok(value)
                    }
                };
            }
        }
        let parent = env.borrow().parent.clone();
        match parent {
            Some(p) => Self::get(&p, name),
            None => Err(EvalError::UnboundName(name.to_string())),
        }
    }

    /// Look up `name` without ever moving it, for use while evaluating a
    /// contravariant condition: the read must not consume the binding,
    /// because the computation that produced it is about to be undone.
    pub fn peek(env: &EnvRef, name: &str) -> EvalResult<Value> {
        {
            let this = env.borrow();
            if let Some(slot) = this.values.get(name) {
                return match slot {
                    Slot::Moved => Err(EvalError::MovedValue(name.to_string())),
                    Slot::Bound(value) => Ok(value.clone()),
                };
            }
        }
        let parent = env.borrow().parent.clone();
        match parent {
            Some(p) => Self::peek(&p, name),
            None => Err(EvalError::UnboundName(name.to_string())),
        }
    }

    /// Walk the enclosing chain; if `name` already exists anywhere on it,
    /// assign in that scope. Otherwise create a fresh binding in `env`.
    pub fn set(env: &EnvRef, name: &str, value: Value) {
        if !Self::assign_existing(env, name, &value) {
            env.borrow_mut().values.insert(name.to_string(), Slot::Bound(value));
        }
    }

    fn assign_existing(env: &EnvRef, name: &str, value: &Value) -> bool {
        {
            let mut this = env.borrow_mut();
            if this.values.contains_key(name) {
                this.values.insert(name.to_string(), Slot::Bound(value.clone()));
                return true;
            }
        }
        let parent = env.borrow().parent.clone();
        match parent {
            Some(p) => Self::assign_existing(&p, name, value),
            None => false,
        }
    }

    /// Hand out a fresh wire. The allocator is shared by every scope
    /// descending from the same root, is append-only, and never reuses an
    /// index.
    pub fn alloc_qubit(env: &EnvRef) -> Wire {
        let alloc = Rc::clone(&env.borrow().qubit_alloc);
        let idx = alloc.get();
        alloc.set(idx + 1);
        Wire(idx)
    }

    /// Lift a locally-emitted gate through the enclosing scope chain,
    /// applying each ancestor's control wire (innermost first) via
    /// [`Gate::with_control`]. The root scope returns its input unchanged.
    pub fn embed_gate(env: &EnvRef, gate: Gate) -> EvalResult<Vec<Gate>> {
        let control = env.borrow().control;
        let gates = match control {
            Some(c) => gate.with_control(c)?,
            None => vec![gate],
        };
        let parent = env.borrow().parent.clone();
        match parent {
            Some(p) => {
                let mut out = Vec::with_capacity(gates.len());
                for g in gates {
                    out.extend(Self::embed_gate(&p, g)?);
                }
                Ok(out)
            }
            None => Ok(gates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_read_of_linear_value_fails() {
        let root = Environment::root();
        Environment::set(&root, "q", Value::Qubit(Wire(0)));
        assert!(Environment::get(&root, "q").is_ok());
        assert!(matches!(Environment::get(&root, "q"), Err(EvalError::MovedValue(_))));
    }

    #[test]
    fn classical_values_do_not_move() {
        let root = Environment::root();
        Environment::set(&root, "x", Value::Int(1));
        assert!(Environment::get(&root, "x").is_ok());
        assert!(Environment::get(&root, "x").is_ok());
    }

    #[test]
    fn set_walks_up_to_owning_scope() {
        let root = Environment::root();
        Environment::set(&root, "x", Value::Int(1));
        let child = Environment::child(&root);
        Environment::set(&child, "x", Value::Int(2));
        assert!(matches!(Environment::get(&root, "x"), Ok(Value::Int(2))));
    }

    #[test]
    fn unbound_name_without_shadow_creates_locally() {
        let root = Environment::root();
        let child = Environment::child(&root);
        Environment::set(&child, "y", Value::Int(5));
        assert!(matches!(Environment::get(&root, "y"), Err(EvalError::UnboundName(_))));
        assert!(matches!(Environment::get(&child, "y"), Ok(Value::Int(5))));
    }

    #[test]
    fn allocator_is_monotonic_and_shared_across_scopes() {
        let root = Environment::root();
        let child = Environment::child(&root);
        assert_eq!(Environment::alloc_qubit(&root), Wire(0));
        assert_eq!(Environment::alloc_qubit(&child), Wire(1));
        assert_eq!(Environment::alloc_qubit(&root), Wire(2));
    }

    #[test]
    fn embed_gate_lifts_through_nested_controls() {
        let root = Environment::root();
        let outer = Environment::child_with_control(&root, Wire(0));
        let inner = Environment::child_with_control(&outer, Wire(1));
        let gates = Environment::embed_gate(&inner, Gate::Not(Wire(2))).unwrap();
        // Not(2) controlled on 1 -> Cnot(1,2); that controlled on 0 -> 15-gate Toffoli.
        assert_eq!(gates.len(), 15);
    }

    #[test]
    fn embed_gate_is_identity_at_root() {
        let root = Environment::root();
        let gates = Environment::embed_gate(&root, Gate::Hadamard(Wire(0))).unwrap();
        assert_eq!(gates, vec![Gate::Hadamard(Wire(0))]);
    }
}
