use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod command;
pub(crate) mod config;
mod schema;
mod util;

use command::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log queries and decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Check(Check),
    Schema(Schema),
    Init(Init),
    Add(Add),
    List(List),
    Get(Get),
    Find(Find),
    Rename(Rename),
    #[command(name = "rm")]
    Remove(Remove),
}

fn main() -> Result<ExitCode> {
    use Command::*;
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Check(c) => c.run(),
        Schema(s) => s.run().map(|_| ExitCode::SUCCESS),
        Init(i) => i.run().map(|_| ExitCode::SUCCESS),
        Add(a) => a.run().map(|_| ExitCode::SUCCESS),
        List(l) => l.run().map(|_| ExitCode::SUCCESS),
        Get(g) => g.run().map(|_| ExitCode::SUCCESS),
        Find(f) => f.run().map(|_| ExitCode::SUCCESS),
        Rename(r) => r.run().map(|_| ExitCode::SUCCESS),
        Remove(r) => r.run().map(|_| ExitCode::SUCCESS),
    }
}
