//! CafeConnect CLI - Database setup and API lookups.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cc-cli migrate
//!
//! # Replace every cafe with the sample data set
//! cc-cli seed
//!
//! # Search cafes near a college through a running API
//! cc-cli search "Harvard" --api-url http://localhost:5000
//!
//! # Print the menu grouped into storefront sections
//! cc-cli menu --api-url http://localhost:5000
//! cc-cli menu --file menu-export.json
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Wipe and repopulate the cafe table
//! - `search` - College search, printed as JSON
//! - `menu` - Menu sections, printed as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// API used when `--api-url` is not given.
const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "CafeConnect CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Replace all cafes with the sample data set
    Seed,
    /// Find cafes near a college
    Search {
        /// College name or part of it (case-insensitive)
        college: String,

        /// Base URL of the CafeConnect API
        #[arg(long, env = "CAFECONNECT_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
    },
    /// Print the menu grouped into storefront sections
    Menu(MenuArgs),
}

#[derive(Args)]
#[group(multiple = false)]
struct MenuArgs {
    /// Base URL of the CafeConnect API
    #[arg(long, env = "CAFECONNECT_API_URL")]
    api_url: Option<String>,

    /// Read menu items from a JSON export instead of the API
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Logs on stderr, command output alone on stdout
    log_subscriber(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Formatted log output to `writer`, filtered by `RUST_LOG`.
fn log_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::database::migrate().await?,
        Commands::Seed => {
            commands::database::seed().await?;
        }
        Commands::Search { college, api_url } => {
            commands::lookup::search(&api_url, &college).await?;
        }
        Commands::Menu(MenuArgs { api_url, file }) => match file {
            Some(path) => commands::lookup::menu_from_file(path).await?,
            None => {
                let api_url = api_url.as_deref().unwrap_or(DEFAULT_API_URL);
                commands::lookup::menu_from_api(api_url).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_logs_stay_out_of_json_output() {
        let logs = Captured::default();
        let mut stdout = Vec::new();

        tracing::subscriber::with_default(log_subscriber(logs.clone()), || {
            tracing::error!(matches = 1, "Search complete");
            let cafes = serde_json::json!([{"name": "Campus Brew"}]);
            commands::lookup::write_json(&mut stdout, &cafes).unwrap();
        });

        let printed: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(printed[0]["name"], "Campus Brew");

        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Search complete"));
    }
}
