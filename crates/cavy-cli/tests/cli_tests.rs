//! CLI argument parsing tests.
//!
//! The CLI is a binary crate, so its `Cli` type isn't importable here; this
//! mirrors the shape clap is asked to parse and checks it against
//! `try_parse_from`, the same way the core crates test their own grammars.

use clap::Parser;

#[derive(Parser)]
#[command(name = "cavy")]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Compile { input: String },
    Run {
        input: String,
        #[arg(short, long, default_value = "1024")]
        reps: u32,
    },
    Version,
}

#[test]
fn compile_requires_an_input_path() {
    let cli = Cli::try_parse_from(["cavy", "compile", "prog.cavy"]).unwrap();
    match cli.command {
        Commands::Compile { input } => assert_eq!(input, "prog.cavy"),
        _ => panic!("expected Compile"),
    }
}

#[test]
fn run_defaults_reps_to_1024() {
    let cli = Cli::try_parse_from(["cavy", "run", "prog.cavy"]).unwrap();
    match cli.command {
        Commands::Run { input, reps } => {
            assert_eq!(input, "prog.cavy");
            assert_eq!(reps, 1024);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn run_accepts_a_custom_rep_count() {
    let cli = Cli::try_parse_from(["cavy", "run", "prog.cavy", "--reps", "50"]).unwrap();
    match cli.command {
        Commands::Run { reps, .. } => assert_eq!(reps, 50),
        _ => panic!("expected Run"),
    }
}

#[test]
fn verbosity_flag_repeats() {
    let cli = Cli::try_parse_from(["cavy", "-vvv", "version"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["cavy"]).is_err());
}
