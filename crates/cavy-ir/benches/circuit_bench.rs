//! Benchmarks for Cavy circuit operations.
//!
//! Run with: cargo bench -p cavy-ir

use cavy_ir::{Circuit, Gate, Wire};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark appending gates to a circuit.
fn bench_gate_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_push");
    for size in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut circuit = Circuit::new();
                for i in 0..size {
                    circuit.push(black_box(Gate::Not(Wire(i % 8))));
                }
                circuit
            });
        });
    }
    group.finish();
}

/// Benchmark the controlled-gate expansion that dominates nested `if` bodies.
fn bench_with_control(c: &mut Criterion) {
    c.bench_function("cnot_with_control", |b| {
        let gate = Gate::Cnot { control: Wire(0), target: Wire(1) };
        b.iter(|| black_box(gate).with_control(black_box(Wire(2))));
    });
}

criterion_group!(benches, bench_gate_push, bench_with_control);
criterion_main!(benches);
