//! The backend trait circuits are sampled through.

use cavy_ir::Circuit;

use crate::error::BackendResult;
use crate::sample::Sample;

/// Anything that can repeatedly sample a circuit.
///
/// Sampling is synchronous: the core language has no concurrency model, and
/// a backend that needs one (a queued cloud job, say) is expected to block
/// internally until every shot is in.
pub trait Backend {
    /// A short, human-readable name for this backend.
    fn name(&self) -> &str;

    /// Run `circuit` `reps` times and report the labelled wires' outcomes.
    fn sample_circuit(&self, circuit: &Circuit, reps: u32) -> BackendResult<Sample>;
}
