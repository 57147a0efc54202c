//! `rpcgen` command line interface.

mod generate;

use clap::{Parser, Subcommand};
use generate::GenerateArgs;
use std::process::ExitCode;

/// Generate clients, types and SQL from an RPC schema.
#[derive(Parser)]
#[command(name = "rpcgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one or more generators against a schema
    Generate(GenerateArgs),
    /// List registered generators
    List,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::List => {
            list();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn list() {
    for generator in rpcgen_codegen::generators() {
        println!(
            "{:<20} {:<12} .{}",
            generator.name(),
            generator.language(),
            generator.extension()
        );
    }
}
