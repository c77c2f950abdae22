//! End-to-end evaluation of complete programs, checking the exact gate
//! sequence each one lowers to.

use cavy_eval::{EvalError, Evaluator};
use cavy_ir::{Gate, Wire};

fn run(source: &str) -> Evaluator {
    let (stmts, errors) = cavy_syntax::parse(source);
    assert!(errors.is_empty(), "parse errors: {errors:?}");
    let mut evaluator = Evaluator::new();
    evaluator.run(&stmts).expect("evaluation should succeed");
    evaluator
}

fn run_err(source: &str) -> EvalError {
    let (stmts, errors) = cavy_syntax::parse(source);
    assert!(errors.is_empty(), "parse errors: {errors:?}");
    let mut evaluator = Evaluator::new();
    evaluator.run(&stmts).expect_err("evaluation should fail")
}

#[test]
fn literal_true_linearized_is_a_single_not() {
    let e = run("q <- ?true;");
    assert_eq!(e.circuit.gates(), &[Gate::Not(Wire(0))]);
}

#[test]
fn split_of_a_fresh_qubit_is_a_single_hadamard() {
    let e = run("q <- split(qubit());");
    assert_eq!(e.circuit.gates(), &[Gate::Hadamard(Wire(0))]);
}

#[test]
fn split_then_flip_emits_h_then_z() {
    let e = run("q <- split(qubit()); r <- flip(q);");
    assert_eq!(e.circuit.gates(), &[Gate::Hadamard(Wire(0)), Gate::Z(Wire(0))]);
}

#[test]
fn qubit_condition_without_negation_emits_a_bare_cnot() {
    let e = run("q <- ?false; r <- ?false; if q { r <- ~r; }");
    assert_eq!(
        e.circuit.gates(),
        &[Gate::Cnot { control: Wire(0), target: Wire(1) }]
    );
}

#[test]
fn negated_qubit_condition_uncomputes_and_recomputes_the_not() {
    let e = run("q <- ?false; r <- ?false; if ~q { r <- ~r; }");
    assert_eq!(
        e.circuit.gates(),
        &[
            Gate::Not(Wire(0)),
            Gate::Cnot { control: Wire(0), target: Wire(1) },
            Gate::Not(Wire(0)),
        ]
    );
}

#[test]
fn split_of_negated_qubit_condition_uncomputes_both_gates_in_reverse() {
    let e = run("q <- ?false; r <- ?false; if split(~q) { r <- ~r; }");
    assert_eq!(
        e.circuit.gates(),
        &[
            Gate::Hadamard(Wire(0)),
            Gate::Not(Wire(0)),
            Gate::Cnot { control: Wire(0), target: Wire(1) },
            Gate::Not(Wire(0)),
            Gate::Hadamard(Wire(0)),
        ]
    );
}

#[test]
fn bell_pair_program_entangles_then_measures_both_wires() {
    let e = run("q <- split(?false); r <- ?false; if q { r <- ~r; } c <- !q; d <- !r;");
    assert_eq!(
        e.circuit.gates(),
        &[
            Gate::Hadamard(Wire(0)),
            Gate::Cnot { control: Wire(0), target: Wire(1) },
            Gate::StrongMeasurement(Wire(0)),
            Gate::StrongMeasurement(Wire(1)),
        ]
    );
    assert_eq!(e.circuit.wire_for("c"), Some(Wire(0)));
    assert_eq!(e.circuit.wire_for("d"), Some(Wire(1)));
}

#[test]
fn reading_a_qubit_twice_is_a_moved_value_error() {
    let err = run_err("q <- qubit(); r <- q; s <- q;");
    assert_eq!(err, EvalError::MovedValue("q".to_string()));
}

#[test]
fn an_unmoved_qubit_survives_a_quantum_if_and_can_still_be_read_once() {
    let e = run("q <- ?false; r <- ?false; if q { r <- ~r; } c <- !q;");
    assert_eq!(e.circuit.wire_for("c"), Some(Wire(0)));
}

#[test]
fn else_branch_on_a_qubit_condition_is_a_type_error() {
    let err = run_err("q <- ?false; r <- ?false; if q { r <- ~r; } else { r <- ~r; }");
    assert!(matches!(err, EvalError::TypeError(_)));
}

#[test]
fn vectorised_split_acts_on_every_element_of_an_array() {
    let e = run("qs <- [qubit(), qubit()]; rs <- split(qs);");
    assert_eq!(
        e.circuit.gates(),
        &[Gate::Hadamard(Wire(0)), Gate::Hadamard(Wire(1))]
    );
}

#[test]
fn intensional_array_repeats_the_allocator_three_times() {
    let e = run("qs <- [qubit(); 3]; q <- qubit(); flip(q);");
    assert_eq!(e.circuit.gates(), &[Gate::Z(Wire(3))]);
}

#[test]
fn for_loop_over_a_range_allocates_one_qubit_per_iteration() {
    let e = run("for i in 0..3 { q <- qubit(); flip(q); }");
    assert_eq!(
        e.circuit.gates(),
        &[Gate::Z(Wire(0)), Gate::Z(Wire(1)), Gate::Z(Wire(2))]
    );
}

#[test]
fn user_function_call_returns_its_trailing_expression() {
    let e = run("fn make() { split(qubit()) } q <- make();");
    assert_eq!(e.circuit.gates(), &[Gate::Hadamard(Wire(0))]);
}

#[test]
fn classical_binding_can_be_read_any_number_of_times() {
    let e = run("x <- 2; y <- x + x; z <- x * y;");
    assert_eq!(e.circuit.gates(), &[]);
}

#[test]
fn nested_qubit_conditions_yield_a_doubly_controlled_not() {
    let e = run("q0 <- qubit(); q1 <- qubit(); r <- qubit(); if q0 { if q1 { r <- ~r; } }");
    let expanded = Gate::Cnot { control: Wire(1), target: Wire(2) }
        .with_control(Wire(0))
        .unwrap();
    assert_eq!(e.circuit.gates(), expanded.as_slice());
}
