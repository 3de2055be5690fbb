//! `restbind` — compile HTTP endpoint contracts into typed TypeScript
//! bindings, and invoke contracts directly for smoke-testing.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod generate;
mod invoke;

#[derive(Parser)]
#[command(name = "restbind", version, about = "HTTP contract binding compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a directory of contract files into one generated module.
    Generate(generate::GenerateArgs),
    /// Bind one contract and invoke it against a live endpoint.
    Call(invoke::CallArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Call(args) => invoke::run(&args).await,
    };

    match result {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
