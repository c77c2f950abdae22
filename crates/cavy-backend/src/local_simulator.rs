//! A reference, in-process backend that simulates a circuit's exact
//! statevector and samples measurements from it.
//!
//! This is the only backend this crate ships; anything else (cloud
//! queueing, hardware translation) is a collaborator outside the core and
//! outside this crate too.

use std::collections::HashMap;

use cavy_ir::{Circuit, Gate, Wire};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::backend::Backend;
use crate::error::{BackendError, BackendResult};
use crate::sample::Sample;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    fn scale(self, factor: f64) -> Self {
        Complex::new(self.re * factor, self.im * factor)
    }

    fn mul(self, rhs: Complex) -> Self {
        Complex::new(self.re * rhs.re - self.im * rhs.im, self.re * rhs.im + self.im * rhs.re)
    }

    fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

/// Amplitude e^{i*pi/4}, T's phase. `conjugated` negates the angle.
fn t_phase(conjugated: bool) -> Complex {
    let angle = if conjugated { -std::f64::consts::FRAC_PI_4 } else { std::f64::consts::FRAC_PI_4 };
    Complex::new(angle.cos(), angle.sin())
}

/// Dense statevector simulation over `n` qubits, little-endian: bit `w` of
/// a basis index is wire `w`'s value.
struct State {
    amps: Vec<Complex>,
    n: usize,
}

impl State {
    fn zero(n: usize) -> Self {
        let mut amps = vec![Complex::ZERO; 1 << n];
        amps[0] = Complex::new(1.0, 0.0);
        Self { amps, n }
    }

    fn bit(index: usize, wire: usize) -> bool {
        (index >> wire) & 1 == 1
    }

    fn apply_not(&mut self, wire: Wire) {
        let w = wire.0;
        for i in 0..self.amps.len() {
            if !Self::bit(i, w) {
                let j = i | (1 << w);
                self.amps.swap(i, j);
            }
        }
    }

    fn apply_z(&mut self, wire: Wire) {
        let w = wire.0;
        for (i, amp) in self.amps.iter_mut().enumerate() {
            if Self::bit(i, w) {
                *amp = amp.scale(-1.0);
            }
        }
    }

    fn apply_t(&mut self, wire: Wire, conjugated: bool) {
        let w = wire.0;
        let phase = t_phase(conjugated);
        for (i, amp) in self.amps.iter_mut().enumerate() {
            if Self::bit(i, w) {
                *amp = amp.mul(phase);
            }
        }
    }

    fn apply_hadamard(&mut self, wire: Wire) {
        let w = wire.0;
        let mut next = self.amps.clone();
        for i in 0..self.amps.len() {
            if !Self::bit(i, w) {
                let j = i | (1 << w);
                let a = self.amps[i];
                let b = self.amps[j];
                next[i] = Complex::new(a.re + b.re, a.im + b.im).scale(FRAC_1_SQRT_2);
                next[j] = Complex::new(a.re - b.re, a.im - b.im).scale(FRAC_1_SQRT_2);
            }
        }
        self.amps = next;
    }

    fn apply_cnot(&mut self, control: Wire, target: Wire) {
        let (c, t) = (control.0, target.0);
        for i in 0..self.amps.len() {
            if Self::bit(i, c) && !Self::bit(i, t) {
                let j = i | (1 << t);
                self.amps.swap(i, j);
            }
        }
    }

    /// Sample wire `w` in the computational basis and collapse the state,
    /// returning the observed bit.
    fn measure(&mut self, wire: Wire, rng: &mut impl Rng) -> bool {
        let w = wire.0;
        let p_one: f64 = self
            .amps
            .iter()
            .enumerate()
            .filter(|(i, _)| Self::bit(*i, w))
            .map(|(_, amp)| amp.norm_sqr())
            .sum();
        let outcome = rng.gen::<f64>() < p_one;
        let mut norm = 0.0;
        for (i, amp) in self.amps.iter_mut().enumerate() {
            if Self::bit(i, w) == outcome {
                norm += amp.norm_sqr();
            } else {
                *amp = Complex::ZERO;
            }
        }
        let scale = 1.0 / norm.sqrt();
        for amp in &mut self.amps {
            *amp = amp.scale(scale);
        }
        outcome
    }
}

/// Simulates a circuit exactly, one qubit amplitude vector at a time.
///
/// Exponential in qubit count; fine for the small programs this language
/// produces, not meant to scale past a few dozen wires.
#[derive(Debug, Default)]
pub struct LocalSimulator;

impl LocalSimulator {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for LocalSimulator {
    fn name(&self) -> &str {
        "local_simulator"
    }

    fn sample_circuit(&self, circuit: &Circuit, reps: u32) -> BackendResult<Sample> {
        if reps == 0 {
            return Err(BackendError::InvalidShots("reps must be at least 1".to_string()));
        }
        let n = circuit.max_wire().map(|w| w.0 + 1).unwrap_or(0);
        let mut rng = rand::thread_rng();
        let mut outcomes = Vec::with_capacity(reps as usize);

        for _ in 0..reps {
            let mut state = State::zero(n);
            let mut bits: HashMap<Wire, bool> = HashMap::new();
            for gate in circuit.gates() {
                match *gate {
                    Gate::Not(w) => state.apply_not(w),
                    Gate::Z(w) => state.apply_z(w),
                    Gate::T { wire, conjugated } => state.apply_t(wire, conjugated),
                    Gate::Hadamard(w) => state.apply_hadamard(w),
                    Gate::Cnot { control, target } => state.apply_cnot(control, target),
                    Gate::StrongMeasurement(w) => {
                        bits.insert(w, state.measure(w, &mut rng));
                    }
                }
            }
            let mut named: FxHashMap<String, bool> = FxHashMap::default();
            for (name, wire) in circuit.qubit_labels() {
                named.insert(name.clone(), bits.get(wire).copied().unwrap_or(false));
            }
            outcomes.push(named);
        }

        Ok(Sample::from_circuit(circuit, outcomes))
    }
}
