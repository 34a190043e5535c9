//! OvpnForge CLI binary entrypoint.
//!
//! This is the main entry point for the `ovpnforge` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ovpnforge_cli::cli::{Cli, Commands};
use ovpnforge_cli::commands;
use ovpnforge_cli::error::CliError;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::BuildCa(args) => commands::build_ca::run(&mut stdout, &args),
        Commands::BuildServerCert(args) => commands::build_server_cert::run(&mut stdout, &args),
        Commands::BuildClientCert(args) => commands::build_client_cert::run(&mut stdout, &args),
        Commands::ServerConfig(args) => commands::server_config::run(&mut stdout, &args),
        Commands::ClientConfig(args) => commands::client_config::run(&mut stdout, &args),
        Commands::StaticKey(args) => commands::static_key::run(&mut stdout, &args),
    }
}
