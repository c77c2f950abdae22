//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use cavy_backend::{Backend, LocalSimulator};
use cavy_eval::Evaluator;

/// Parse, evaluate, and sample a source file against the local simulator.
pub fn execute(input: &str, reps: u32) -> Result<()> {
    let source =
        fs::read_to_string(input).with_context(|| format!("failed to read file: {input}"))?;

    let (stmts, errors) = cavy_syntax::parse(&source);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("{} {}", style("error:").red().bold(), err);
        }
        anyhow::bail!("{} parse error(s) in {input}", errors.len());
    }

    let mut evaluator = Evaluator::new();
    evaluator
        .run(&stmts)
        .map_err(|e| anyhow::anyhow!("evaluation error: {e}"))?;

    let backend = LocalSimulator::new();
    let sample = backend
        .sample_circuit(&evaluator.circuit, reps)
        .map_err(|e| anyhow::anyhow!("backend error: {e}"))?;

    println!(
        "{} {} shots on {}",
        style("→").cyan().bold(),
        sample.len(),
        backend.name()
    );

    let mut names: Vec<&String> = evaluator.circuit.qubit_labels().keys().collect();
    names.sort();
    for name in names {
        let bits = sample.bits(name).unwrap_or_default();
        let ones = bits.iter().filter(|b| **b).count();
        println!(
            "  {}: {} ones / {} shots",
            style(name).green(),
            ones,
            bits.len()
        );
    }

    if let Some((tuple, count)) = sample.most_frequent() {
        println!(
            "  most frequent: {:?} ({count} / {} shots)",
            tuple,
            sample.len()
        );
    }

    Ok(())
}
