//! Command-line interface for protoclass.

use clap::{Parser, Subcommand};
use protoclass_runtime::Strategy;

#[derive(Parser)]
#[command(name = "protoclass")]
#[command(about = "Classical inheritance over chained member namespaces", long_about = None)]
pub struct Cli {
    /// Composition strategy: none, snapshot or live. Defaults to the
    /// PROTOCLASS_STRATEGY environment variable, then `live`.
    #[arg(long, global = true)]
    pub strategy: Option<Strategy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the demonstration scenario and print what each step observes
    Demo,
    /// Print the active composition strategy
    Strategy,
}
