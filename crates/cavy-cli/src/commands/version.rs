//! Version command implementation.

use console::style;

pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "{} {}",
        style("cavy").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!("  cavy-ir       circuit intermediate representation");
    println!("  cavy-syntax   lexer and parser");
    println!("  cavy-eval     tree-walking evaluator");
    println!("  cavy-backend  sampling backend trait and reference simulator");
}
