use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod bank;

/// Console ATM simulation.
#[derive(Parser)]
#[command(name = "atm")]
#[command(about = "Console ATM simulation", long_about = None)]
struct Cli {
    /// CSV file with the user and admin accounts to start from
    #[arg(long)]
    accounts: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so they never interleave with the menus.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.accounts {
        Some(path) => match bank::AtmConfig::from_path(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded accounts");
                config
            }
            Err(err) => {
                eprintln!("Error loading accounts: {err}");
                std::process::exit(1);
            }
        },
        None => bank::AtmConfig::default(),
    };

    let mut atm = bank::Atm::new(
        config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    let code = match atm.run().await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!("session ended abnormally: {err}");
            eprintln!("Error: {err}");
            1
        }
    };
    std::process::exit(code);
}
