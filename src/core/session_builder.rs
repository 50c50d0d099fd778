//! Session extraction
//!
//! This module turns the scraped rows of the dashboard's account table into a
//! validated [`Session`]. It enforces the session invariants:
//! - the source account is present
//! - at least one fillable account remains after exclusions
//! - account names are unique
//! - at most one (and, when tracked, exactly one) row is marked as selected
//!
//! Layout quirks such as a header row without cells are tolerated; structural
//! violations such as missing columns or unparseable currency are fatal.

use crate::core::currency::CurrencyCodec;
use crate::types::{Account, BalanceError, ScrapedRow, Session};
use std::collections::HashSet;
use tracing::debug;

/// Number of leading columns the dashboard layout guarantees: name, server, credit, price
pub const ACCOUNT_COLUMNS: usize = 4;

/// Whether the "currently selected" marker of a row is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTracking {
    /// Exactly one row must be marked as selected
    Required,
    /// Selection markers are ignored
    Ignored,
}

/// Which accounts take part in a balancing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    /// Name of the account money is drawn from (case-sensitive)
    pub source: String,

    /// Names of accounts to skip entirely (case-insensitive)
    pub excluded: Vec<String>,
}

impl SessionSettings {
    pub fn new(source: impl Into<String>, excluded: Vec<String>) -> Self {
        SessionSettings {
            source: source.into(),
            excluded,
        }
    }

    /// Check whether an account name is on the exclusion list
    pub fn is_excluded(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.excluded
            .iter()
            .any(|excluded| excluded.to_lowercase() == name)
    }
}

/// Builds validated sessions from scraped account rows
#[derive(Debug, Clone)]
pub struct SessionBuilder<'a> {
    settings: &'a SessionSettings,
    codec: &'a CurrencyCodec,
    tracking: SelectionTracking,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(
        settings: &'a SessionSettings,
        codec: &'a CurrencyCodec,
        tracking: SelectionTracking,
    ) -> Self {
        SessionBuilder {
            settings,
            codec,
            tracking,
        }
    }

    /// Build a session from one scrape of the account table
    ///
    /// # Arguments
    ///
    /// * `rows` - Table rows in dashboard order
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` if all rows decode and the session invariants hold
    /// * `Err(BalanceError)` describing the first violation found
    ///
    /// # Errors
    ///
    /// Row-level failures (`TableLayout`, `Parse`, `InvalidAccount`,
    /// `DuplicateAccount`, `AmbiguousState`) are reported as soon as the
    /// offending row is reached. `SourceNotFound`, `EmptyTargetSet` and
    /// `SelectedNotFound` are checked in that order after the last row.
    pub fn build(&self, rows: &[ScrapedRow]) -> Result<Session, BalanceError> {
        let mut source_account = None;
        let mut selected_account: Option<Account> = None;
        let mut fillable_accounts = Vec::new();
        let mut seen_names = HashSet::new();

        for (index, row) in rows.iter().enumerate() {
            // Header rows render their cells as `th`, which leaves no data columns
            if row.columns.is_empty() {
                debug!(row = index, "Skipping account table row without cells");
                continue;
            }

            let account = self.decode_row(index, row)?;

            if self.settings.is_excluded(account.name()) {
                debug!(account = account.name(), "Excluding account");
                continue;
            }

            if !seen_names.insert(account.name().to_string()) {
                return Err(BalanceError::DuplicateAccount {
                    name: account.name().to_string(),
                });
            }

            if row.selected && self.tracking == SelectionTracking::Required {
                if let Some(previous) = &selected_account {
                    return Err(BalanceError::ambiguous_state(
                        previous.name(),
                        account.name(),
                    ));
                }
                selected_account = Some(account.clone());
            }

            if account.name() == self.settings.source {
                source_account = Some(account);
                continue;
            }

            fillable_accounts.push(account);
        }

        let source_account =
            source_account.ok_or_else(|| BalanceError::source_not_found(&self.settings.source))?;

        if fillable_accounts.is_empty() {
            return Err(BalanceError::EmptyTargetSet);
        }

        if self.tracking == SelectionTracking::Required && selected_account.is_none() {
            return Err(BalanceError::SelectedNotFound);
        }

        debug!(
            source = source_account.name(),
            selected = selected_account.as_ref().map(Account::name),
            targets = fillable_accounts.len(),
            "Built session"
        );

        Ok(Session::new(
            source_account,
            selected_account,
            fillable_accounts,
        ))
    }

    fn decode_row(&self, index: usize, row: &ScrapedRow) -> Result<Account, BalanceError> {
        if row.columns.len() < ACCOUNT_COLUMNS {
            return Err(BalanceError::TableLayout {
                row: index,
                found: row.columns.len(),
                expected: ACCOUNT_COLUMNS,
            });
        }

        let name = row.columns[0].trim();
        let server = row.columns[1].trim();
        let credit_in_cents = self.codec.parse(&row.columns[2])?;
        let price_in_cents = self.codec.parse(&row.columns[3])?;

        if name.is_empty() {
            return Err(BalanceError::invalid_account(index, "empty account name"));
        }

        Account::new(name, server, credit_in_cents, price_in_cents)
            .ok_or_else(|| BalanceError::invalid_account(index, "empty server name"))
    }
}
