//! Transfer-related types
//!
//! This module defines the balancing plan entries and the summary of a run.

use super::account::Account;

/// Minor currency units (cents)
pub type Cents = i64;

/// One entry of a balancing plan
///
/// Entries with a zero amount stay in the plan so that reporting can state
/// that no fillup is needed; they are never dispatched to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTransfer {
    /// The account to fill up
    pub account: Account,

    /// Amount missing to reach the target balance, zero if none
    pub amount_in_cents: Cents,
}

impl PlannedTransfer {
    /// Whether this entry requires a transfer
    pub fn needs_fillup(&self) -> bool {
        self.amount_in_cents > 0
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The full balancing plan in account order
    pub plan: Vec<PlannedTransfer>,

    /// Names of accounts that received a confirmed transfer, in order
    pub transferred: Vec<String>,

    /// Sum of all planned amounts
    pub total_required_in_cents: Cents,

    /// Whether the run only reported the plan
    pub dry_run: bool,
}
