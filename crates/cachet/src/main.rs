//! cachet - Entry Point
//!
//! Binary entry point for the cachet command line tool. Lives in the
//! `cachet` facade crate next to the library it drives.

// Force-link cachet-providers to ensure linkme inventory registrations are included
extern crate cachet_providers;

use cachet::cli::{Cli, run};
use clap::Parser;

/// Main entry point for the cachet command line tool
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli).await
}
