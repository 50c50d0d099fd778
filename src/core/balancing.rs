//! Balancing engine
//!
//! Computes how much each fillable account needs to reach the target balance.
//! Everything here is pure; no dashboard interaction happens in this module.

use crate::types::{Account, Cents, PlannedTransfer, Session};

/// Amount missing for an account to reach the target balance
///
/// Returns `0` if the account already holds at least the target amount,
/// otherwise the exact difference. Negative credit (debt) is filled up as
/// well, so the result can exceed the target amount.
///
/// ```
/// use uberspace_balancer::core::balancing::missing_amount;
/// use uberspace_balancer::Account;
///
/// let account = Account::new("web", "stardust", 300, 0).unwrap();
/// assert_eq!(missing_amount(&account, 1000), 700);
/// assert_eq!(missing_amount(&account, 300), 0);
/// ```
pub fn missing_amount(account: &Account, target_amount_in_cents: Cents) -> Cents {
    let credit = account.credit_in_cents();
    if credit >= target_amount_in_cents {
        return 0;
    }
    target_amount_in_cents.saturating_sub(credit)
}

/// Plan the fillup of every fillable account, preserving session order
///
/// Accounts that need nothing stay in the plan with a zero amount.
pub fn plan_transfers(session: &Session, target_amount_in_cents: Cents) -> Vec<PlannedTransfer> {
    session
        .fillable_accounts()
        .iter()
        .map(|account| PlannedTransfer {
            account: account.clone(),
            amount_in_cents: missing_amount(account, target_amount_in_cents),
        })
        .collect()
}

/// Sum of all planned amounts
pub fn total_required(plan: &[PlannedTransfer]) -> Cents {
    plan.iter()
        .fold(0, |total: Cents, entry| total.saturating_add(entry.amount_in_cents))
}
