//! Uberspace Account Balancer CLI
//!
//! Command-line interface for filling up uberspace accounts from a source account.
//!
//! # Usage
//!
//! ```bash
//! geckodriver &
//! cargo run -- main 10                      # dry run: report what would be transferred
//! cargo run -- main 10 --execute            # transfer for real
//! cargo run -- main 10 -x --exclude legacy  # leave an account untouched
//! cargo run -- --variant direct main 10     # older dashboard without account marker
//! ```
//!
//! The browser driven by the WebDriver server must already be logged in to
//! the dashboard. Report lines go to stdout, logs (`RUST_LOG`) to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (including dry runs)
//! - 1: Error (invalid arguments, browser failure, inconsistent dashboard state,
//!   unconfirmed transfer, interrupt)

use std::process;
use uberspace_balancer::driver::RemoteWebDriver;
use uberspace_balancer::{app, cli, logging};

#[tokio::main]
async fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    logging::init_tracing();

    let config = match args.to_balance_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let driver = match RemoteWebDriver::connect(&config.server_url).await {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Error: Could not start browser session: {}", e);
            process::exit(1);
        }
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // Without a signal handler the run can only end on its own
            std::future::pending::<()>().await;
        }
    };

    // The session is released inside `run` before any error reaches us
    let mut output = std::io::stdout();
    if let Err(e) = app::run(driver, &config, &mut output, shutdown).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
