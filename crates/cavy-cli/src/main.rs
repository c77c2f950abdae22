//! Command-line driver for Cavy.
//!
//! This binary is a thin collaborator over the core crates: it reads a
//! source file, drives the lexer/parser/evaluator, and optionally samples
//! the resulting circuit on the reference local simulator. A REPL and
//! crash-log persistence are separate, out-of-scope collaborators this
//! binary does not attempt to be.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compile, run, version};

#[derive(Parser)]
#[command(name = "cavy")]
#[command(author, version, about = "Compiler-interpreter for the Cavy quantum language", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and evaluate a program, printing the circuit it lowers to
    Compile {
        /// Source file
        input: String,
    },

    /// Parse, evaluate, and sample a program on the local simulator
    Run {
        /// Source file
        input: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        reps: u32,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Compile { input } => compile::execute(&input),
        Commands::Run { input, reps } => run::execute(&input, reps),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
