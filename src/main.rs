//! WEAO cache refresher - writes the WEAO API documents into .well-known/weao
//!
//! Run locally or in CI before building the static site.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use weao_cache::cache::format_timestamp;
use weao_cache::cli::Cli;
use weao_cache::error::describe;
use weao_cache::Refresher;

/// Sets up logging to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_tracing();

    let result = match Refresher::for_current_dir() {
        Ok(refresher) => refresher.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            println!(
                "WEAO cache refreshed at {}",
                format_timestamp(&report.fetched_at)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to refresh WEAO cache: {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}
