//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use cavy_eval::Evaluator;

/// Parse and evaluate a source file, printing a summary of the circuit it
/// lowers to. Does not sample it.
pub fn execute(input: &str) -> Result<()> {
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

    println!(
        "{} compiled {} ({} gates, {} labelled wire(s))",
        style("OK").green().bold(),
        style(input).cyan(),
        evaluator.circuit.len(),
        evaluator.circuit.qubit_labels().len(),
    );
    for gate in evaluator.circuit.gates() {
        println!("  {gate}");
    }

    Ok(())
}
