//! Transfer workflow
//!
//! Walks a balancing plan in order, reports every entry and, in execute mode,
//! transfers the missing amount to each account that needs it. The first
//! failure aborts the run; later entries are not attempted and nothing is
//! rolled back.

use crate::dashboard::Dashboard;
use crate::driver::WebDriver;
use crate::io::Reporter;
use crate::types::{BalanceError, PlannedTransfer};
use tracing::{debug, info};

/// Whether transfers are carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report the plan only
    DryRun,
    /// Transfer money on the dashboard
    Execute,
}

impl RunMode {
    pub fn from_execute_flag(execute: bool) -> Self {
        if execute {
            RunMode::Execute
        } else {
            RunMode::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

/// Executes a balancing plan against the dashboard
#[derive(Debug, Clone, Copy)]
pub struct TransferWorkflow {
    mode: RunMode,
}

impl TransferWorkflow {
    pub fn new(mode: RunMode) -> Self {
        TransferWorkflow { mode }
    }

    /// Report and, in execute mode, carry out every plan entry in order
    ///
    /// # Returns
    ///
    /// Names of the accounts that received a confirmed transfer
    ///
    /// # Errors
    ///
    /// The first `TransferConfirmation` or driver error aborts the workflow.
    pub async fn run<D: WebDriver>(
        &self,
        dashboard: &mut Dashboard<'_, D>,
        plan: &[PlannedTransfer],
        reporter: &mut Reporter<'_>,
    ) -> Result<Vec<String>, BalanceError> {
        let mut transferred = Vec::new();

        for entry in plan {
            reporter.planned(entry)?;

            if !entry.needs_fillup() {
                continue;
            }
            if self.mode.is_dry_run() {
                debug!(account = entry.account.name(), "Dry run, skipping transfer");
                continue;
            }

            dashboard
                .transfer(&entry.account, entry.amount_in_cents)
                .await?;
            info!(
                account = entry.account.name(),
                amount_in_cents = entry.amount_in_cents,
                "Transfer confirmed"
            );
            reporter.transferred(entry)?;
            transferred.push(entry.account.name().to_string());
        }

        Ok(transferred)
    }
}
