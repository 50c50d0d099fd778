//! Account-related types for the balancer
//!
//! This module defines the Account value object scraped from the dashboard's
//! account table.

/// A billable hosting account
///
/// Immutable snapshot of one row of the dashboard's account table. Two
/// accounts are equal when their names are equal (case-sensitive); the
/// economic fields are ignored for equality because they change between
/// scrapes.
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    server: String,
    credit_in_cents: i64,
    price_in_cents: i64,
}

impl Account {
    /// Create a new account
    ///
    /// # Arguments
    ///
    /// * `name` - The account name, unique within the dashboard
    /// * `server` - The hosting node the account lives on
    /// * `credit_in_cents` - Current balance, negative when in debt
    /// * `price_in_cents` - Recurring cost of the account
    ///
    /// # Returns
    ///
    /// * `Some(Account)` if name and server are non-empty
    /// * `None` otherwise
    pub fn new(
        name: impl Into<String>,
        server: impl Into<String>,
        credit_in_cents: i64,
        price_in_cents: i64,
    ) -> Option<Self> {
        let name = name.into();
        let server = server.into();
        if name.is_empty() || server.is_empty() {
            return None;
        }

        Some(Account {
            name,
            server,
            credit_in_cents,
            price_in_cents,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn credit_in_cents(&self) -> i64 {
        self.credit_in_cents
    }

    pub fn price_in_cents(&self) -> i64 {
        self.price_in_cents
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Account {}
