//! Uberspace Account Balancer Library
//! # Overview
//!
//! Tops up a set of prepaid hosting accounts to a target balance by
//! transferring money from a source account through the hosting provider's
//! web dashboard, which has no API and is therefore driven through a browser.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Session, plan entries, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Validated run configuration
//! - [`core`] - Pure business logic:
//!   - [`core::currency`] - Locale currency strings to integer cents and back
//!   - [`core::session_builder`] - Scraped table rows to a validated session
//!   - [`core::balancing`] - Missing amounts and the fillup plan
//! - [`driver`] - WebDriver boundary and W3C HTTP client
//! - [`dashboard`] - Dashboard DOM contract, scraping and transfer form
//! - [`strategy`] - Account switching for the two dashboard versions
//! - [`workflow`] - Sequential execution of the plan
//! - [`io`] - Report lines
//! - [`app`] - One complete run with guaranteed session release
//!
//! # Run Modes
//!
//! - **Dry run** (default): the plan is reported, no money moves
//! - **Execute**: each account below the target receives exactly the missing
//!   amount, one at a time; the first unconfirmed transfer aborts the run

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod driver;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;
pub mod workflow;

pub use config::BalanceConfig;
pub use crate::core::{CurrencyCodec, SessionBuilder, SessionSettings};
pub use driver::{RemoteWebDriver, WebDriver};
pub use types::{
    Account, BalanceError, Cents, ConfigError, PlannedTransfer, RunSummary, ScrapedRow, Session,
};
pub use workflow::{RunMode, TransferWorkflow};
