//! The result of repeatedly sampling a circuit.

use cavy_ir::Circuit;
use rustc_hash::FxHashMap;

/// One shot's outcome: the classical bit recorded on each labelled wire, in
/// the order the circuit assigned those labels.
pub type Shot = Vec<bool>;

/// `reps` independent shots of a circuit's labelled wires.
///
/// Exposes indexing by label name, frequency counts over the full
/// result-tuple, and the most frequent tuple, per the consumer-facing API a
/// REPL or script drives a backend through.
#[derive(Debug, Clone)]
pub struct Sample {
    names: Vec<String>,
    shots: Vec<Shot>,
}

impl Sample {
    pub(crate) fn new(names: Vec<String>, shots: Vec<Shot>) -> Self {
        Self { names, shots }
    }

    /// Build a `Sample` from a completed circuit, pairing its labels with
    /// each shot's bits in label order.
    pub fn from_circuit(circuit: &Circuit, outcomes: Vec<FxHashMap<String, bool>>) -> Self {
        let mut names: Vec<String> = circuit.qubit_labels().keys().cloned().collect();
        names.sort();
        let shots = outcomes
            .into_iter()
            .map(|outcome| names.iter().map(|n| outcome.get(n).copied().unwrap_or(false)).collect())
            .collect();
        Self::new(names, shots)
    }

    /// The number of shots taken.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Every bit recorded for `name`, one per shot, in shot order.
    pub fn bits(&self, name: &str) -> Option<Vec<bool>> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(self.shots.iter().map(|shot| shot[idx]).collect())
    }

    /// Frequency counts over the full result-tuple (one entry per shot,
    /// bits ordered by label name).
    pub fn counts(&self) -> FxHashMap<Shot, usize> {
        let mut counts = FxHashMap::default();
        for shot in &self.shots {
            *counts.entry(shot.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The most frequent result-tuple and how many shots produced it, or
    /// `None` if no shots were taken.
    pub fn most_frequent(&self) -> Option<(Shot, usize)> {
        self.counts().into_iter().max_by_key(|(_, count)| *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        Sample::new(
            vec!["c".to_string(), "d".to_string()],
            vec![vec![true, true], vec![false, false], vec![true, true]],
        )
    }

    #[test]
    fn bits_indexes_by_label_name() {
        let s = sample();
        assert_eq!(s.bits("c"), Some(vec![true, false, true]));
        assert_eq!(s.bits("missing"), None);
    }

    #[test]
    fn most_frequent_tuple_wins_the_tie_break_by_count() {
        let s = sample();
        let (tuple, count) = s.most_frequent().unwrap();
        assert_eq!(tuple, vec![true, true]);
        assert_eq!(count, 2);
    }

    #[test]
    fn counts_sum_to_the_number_of_shots() {
        let s = sample();
        let total: usize = s.counts().values().sum();
        assert_eq!(total, s.len());
    }
}
