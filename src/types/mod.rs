//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the Account value object
//! - `session`: scraped rows and the validated Session
//! - `transfer`: balancing plan entries and run summaries
//! - `error`: Error types for the balancer

pub mod account;
pub mod error;
pub mod session;
pub mod transfer;

pub use account::Account;
pub use error::{BalanceError, ConfigError};
pub use session::{ScrapedRow, Session};
pub use transfer::{Cents, PlannedTransfer, RunSummary};
