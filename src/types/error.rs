//! Error types for the account balancer
//!
//! This module defines every fatal condition a balancing run can end in.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Scrape Errors**: unparseable currency cells, missing columns, invalid rows
//! - **Session Errors**: missing source or selected account, ambiguous selection,
//!   nothing to balance
//! - **Workflow Errors**: failed context switch, unconfirmed transfer
//! - **Environment Errors**: invalid configuration, driver failures, output failures
//!
//! None of these are recovered from locally. Every variant aborts the run.

use crate::driver::DriverError;
use thiserror::Error;

/// Main error type for a balancing run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// A scraped monetary cell could not be decoded
    #[error("Could not parse currency value '{value}': {reason}")]
    Parse {
        /// The raw cell text
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A table row does not have the expected columns
    ///
    /// The dashboard's column layout is a contract; a change in it is a hard failure.
    #[error("Account table row {row} has {found} columns, expected at least {expected}")]
    TableLayout {
        /// Zero-based row index in scrape order
        row: usize,
        /// Number of columns that were found
        found: usize,
        /// Number of columns the layout requires
        expected: usize,
    },

    /// A row decoded into an account that violates the account invariants
    #[error("Invalid account in table row {row}: {reason}")]
    InvalidAccount {
        /// Zero-based row index in scrape order
        row: usize,
        /// Which invariant was violated
        reason: String,
    },

    /// The same account name appeared twice in one scrape
    #[error("Account {name} appears more than once in the account table")]
    DuplicateAccount {
        /// The duplicated account name
        name: String,
    },

    /// The configured source account is not in the table
    #[error("Source account could not be detected: {name}")]
    SourceNotFound {
        /// The configured source account name
        name: String,
    },

    /// No row carried the "currently selected" marker
    #[error("The selected account could not be detected")]
    SelectedNotFound,

    /// More than one row carried the "currently selected" marker
    #[error("Duplicated selected account detected: {first} and {second}")]
    AmbiguousState {
        /// The first account marked as selected
        first: String,
        /// The second account marked as selected
        second: String,
    },

    /// Nothing is left to balance after removing source and excluded accounts
    #[error("No target accounts could be detected")]
    EmptyTargetSet,

    /// After switching context the dashboard selected a different account
    #[error("Switching to source account failed: expected {expected} to be selected, but {actual} is")]
    Consistency {
        /// The account that should be selected
        expected: String,
        /// The account that actually is selected
        actual: String,
    },

    /// A transfer was not confirmed by the dashboard
    #[error("Transfer to account {account} was not confirmed: {reason}")]
    TransferConfirmation {
        /// The target account of the failed transfer
        account: String,
        /// What went wrong while waiting for confirmation
        reason: String,
    },

    /// The run configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The automation driver failed
    #[error("Browser automation failed: {0}")]
    Driver(#[from] DriverError),

    /// A report line could not be written
    #[error("Could not write report: {message}")]
    Report {
        /// Description of the I/O error
        message: String,
    },

    /// The run was interrupted by the user
    #[error("Interrupted by user")]
    Interrupted,
}

/// Configuration errors detected before any browser interaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The target amount is not a valid non-negative amount with at most two decimals
    #[error("Invalid target amount '{value}': {reason}")]
    InvalidAmount {
        /// The raw argument
        value: String,
        /// Why the amount was rejected
        reason: String,
    },

    /// A configured URL is malformed
    #[error("Invalid URL '{value}': {reason}")]
    InvalidUrl {
        /// The raw argument
        value: String,
        /// Why the URL was rejected
        reason: String,
    },

    /// A timeout or delay is out of range
    #[error("Invalid {name}: {reason}")]
    InvalidDuration {
        /// Name of the option
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl From<std::io::Error> for BalanceError {
    fn from(error: std::io::Error) -> Self {
        BalanceError::Report {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BalanceError {
    /// Create a Parse error
    pub fn parse(value: &str, reason: &str) -> Self {
        BalanceError::Parse {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidAccount error
    pub fn invalid_account(row: usize, reason: &str) -> Self {
        BalanceError::InvalidAccount {
            row,
            reason: reason.to_string(),
        }
    }

    /// Create a SourceNotFound error
    pub fn source_not_found(name: &str) -> Self {
        BalanceError::SourceNotFound {
            name: name.to_string(),
        }
    }

    /// Create an AmbiguousState error
    pub fn ambiguous_state(first: &str, second: &str) -> Self {
        BalanceError::AmbiguousState {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Create a Consistency error
    pub fn consistency(expected: &str, actual: &str) -> Self {
        BalanceError::Consistency {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a TransferConfirmation error
    pub fn transfer_confirmation(account: &str, reason: impl Into<String>) -> Self {
        BalanceError::TransferConfirmation {
            account: account.to_string(),
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(value: &str, reason: &str) -> Self {
        ConfigError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
