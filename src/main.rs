//! Protoclass CLI entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use protoclass::demo;
use protoclass_runtime::{ClassFactory, Strategy};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "protoclass=info,protoclass_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let strategy = match cli.strategy {
        Some(strategy) => Strategy::install(strategy),
        None => Strategy::active(),
    };
    tracing::debug!(%strategy, "resolved composition strategy");
    let factory = ClassFactory::new(strategy);

    match cli.command {
        Command::Demo => match demo::run(factory) {
            Ok(transcript) => print!("{transcript}"),
            Err(e) => {
                eprintln!("Demo failed: {e}");
                std::process::exit(1);
            }
        },
        Command::Strategy => {
            println!("strategy: {strategy}");
            match factory.require_live_support() {
                Ok(_) => println!("live inheritance: available"),
                Err(e) => println!("live inheritance: {e}"),
            }
        }
    }
}
