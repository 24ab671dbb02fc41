#![deny(missing_docs)]

//! # Modpatch CLI
//!
//! Command Line Interface for generating Angular modules and registering them
//! in existing module descriptors.
//!
//! Supported Commands:
//! - `module`: Generates a module and registers it as an import or a lazy route.
//!
//! Logs go to stderr and are filtered with `RUST_LOG`; stdout carries one line
//! per changed file.

use modpatch_core::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::lint::ShellExecutor;

mod error;
mod lint;
mod module_cmd;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Angular module registration toolchain")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates a module and registers it in its parent module.
    Module(module_cmd::ModuleArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "modpatch_core=info,modpatch=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Commands::Module(args) => {
            // Injecting the shell executor for the lint step
            module_cmd::execute(args, ShellExecutor)?;
        }
    }

    Ok(())
}
