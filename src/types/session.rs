//! Session-related types
//!
//! A Session is the validated result of one scrape of the dashboard's
//! account table. It is built once per scrape and never mutated.

use super::account::Account;

/// One row of the dashboard's account table as delivered by the scraping adapter
///
/// `columns` keeps the dashboard's positional order (name, server, credit, price).
/// `selected` is true when the dashboard marks this row as the active account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapedRow {
    pub columns: Vec<String>,
    pub selected: bool,
}

impl ScrapedRow {
    /// Create a row that is not marked as selected
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScrapedRow {
            columns: columns.into_iter().map(Into::into).collect(),
            selected: false,
        }
    }

    /// Mark this row as the dashboard's currently selected account
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Validated snapshot of the dashboard state
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    source_account: Account,
    selected_account: Option<Account>,
    fillable_accounts: Vec<Account>,
}

impl Session {
    /// Assemble a session from already validated parts
    ///
    /// Invariants (source not among fillable accounts, fillable accounts
    /// non-empty) are enforced by the session builder, which is the only
    /// producer of sessions outside of tests.
    pub fn new(
        source_account: Account,
        selected_account: Option<Account>,
        fillable_accounts: Vec<Account>,
    ) -> Self {
        Session {
            source_account,
            selected_account,
            fillable_accounts,
        }
    }

    pub fn source_account(&self) -> &Account {
        &self.source_account
    }

    /// The account the dashboard currently has active, if the variant tracks one
    pub fn selected_account(&self) -> Option<&Account> {
        self.selected_account.as_ref()
    }

    /// Accounts eligible for fillup, in scrape order
    pub fn fillable_accounts(&self) -> &[Account] {
        &self.fillable_accounts
    }

    /// Whether the source account is the dashboard's active account
    ///
    /// Always false when the session does not track a selected account.
    pub fn is_source_account_selected(&self) -> bool {
        self.selected_account
            .as_ref()
            .is_some_and(|selected| selected == &self.source_account)
    }
}
