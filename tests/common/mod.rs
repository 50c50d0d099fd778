//! In-memory stand-in for the hosting dashboard
//!
//! Implements the WebDriver capability set on top of a tiny model of the
//! dashboard: an accounts table, a selected account, the switch endpoint and
//! the transfer form. Every driver call is recorded so tests can check what
//! was (and was not) done to the page.

#![allow(dead_code)]

use reqwest::Url;
use std::collections::HashMap;
use uberspace_balancer::core::currency::parse_target_amount;
use uberspace_balancer::core::CurrencyCodec;
use uberspace_balancer::dashboard::DashboardLayout;
use uberspace_balancer::driver::{DriverError, ElementRef, Locator, WebDriver};
use uberspace_balancer::Cents;

pub const REJECTION_TEXT: &str = "Der Betrag konnte nicht umgebucht werden.";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Goto(String),
    Click(String),
    Clear(String),
    SendKeys(String, String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Blank,
    Dashboard,
    Accounting,
}

#[derive(Debug, Clone)]
pub struct FakeAccount {
    pub name: String,
    pub server: String,
    pub credit: Cents,
    pub price: Cents,
}

#[derive(Debug)]
pub struct FakeDashboard {
    pub layout: DashboardLayout,
    pub accounts: Vec<FakeAccount>,
    /// Accounts rendered with the selection marker; the first one pays for transfers
    pub selected: Vec<String>,
    /// Whether the accounts table only renders after the unfold link was clicked
    pub requires_unfold: bool,
    /// Whether the switch endpoint changes the selected account
    pub honor_switch: bool,
    /// Whether the table starts with a header row without data cells
    pub header_row: bool,
    /// Targets the dashboard refuses transfers to
    pub rejected: Vec<String>,
    /// Raw credit cell texts replacing the rendered balance, by account name
    pub credit_texts: HashMap<String, String>,
    pub fail_quit: bool,
    /// Keeps the submit button disabled whatever the form holds
    pub submit_disabled: bool,
    /// Error returned when looking up the status region
    pub status_error: Option<DriverError>,

    pub page: Page,
    pub unfolded: bool,
    pub amount_input: String,
    pub target_input: String,
    pub flash: Option<String>,

    pub calls: Vec<Call>,
    /// Every submitted form as (target, amount text)
    pub submissions: Vec<(String, String)>,
}

impl FakeDashboard {
    /// Dashboard with the given (name, credit in cents) accounts, `selected` marked
    pub fn new(accounts: &[(&str, Cents)], selected: &str) -> Self {
        FakeDashboard {
            layout: DashboardLayout::uberspace(),
            accounts: accounts
                .iter()
                .map(|(name, credit)| FakeAccount {
                    name: name.to_string(),
                    server: "stardust".to_string(),
                    credit: *credit,
                    price: 500,
                })
                .collect(),
            selected: if selected.is_empty() {
                vec![]
            } else {
                vec![selected.to_string()]
            },
            requires_unfold: true,
            honor_switch: true,
            header_row: false,
            rejected: vec![],
            credit_texts: HashMap::new(),
            fail_quit: false,
            submit_disabled: false,
            status_error: None,
            page: Page::Blank,
            unfolded: false,
            amount_input: String::new(),
            target_input: String::new(),
            flash: None,
            calls: vec![],
            submissions: vec![],
        }
    }

    pub fn credit_of(&self, name: &str) -> Option<Cents> {
        self.accounts
            .iter()
            .find(|account| account.name == name)
            .map(|account| account.credit)
    }

    pub fn quit_count(&self) -> usize {
        self.calls.iter().filter(|call| **call == Call::Quit).count()
    }

    /// Whether any call touched the transfer form or its page
    pub fn touched_transfer_form(&self) -> bool {
        let accounting = self.layout.accounting_url();
        self.calls.iter().any(|call| match call {
            Call::Goto(url) => *url == accounting,
            Call::Clear(_) | Call::SendKeys(_, _) => true,
            Call::Click(id) => id == "button:submit",
            Call::Quit => false,
        })
    }

    fn row_offset(&self) -> usize {
        usize::from(self.header_row)
    }

    fn table_visible(&self) -> bool {
        self.page == Page::Dashboard && (!self.requires_unfold || self.unfolded)
    }

    fn account_at(&self, row: usize) -> Option<&FakeAccount> {
        row.checked_sub(self.row_offset())
            .and_then(|index| self.accounts.get(index))
    }

    fn render(&self, cents: Cents) -> String {
        CurrencyCodec::default()
            .format(cents)
            .replace(' ', "\u{a0}")
    }

    fn no_such_element(locator: &Locator) -> DriverError {
        DriverError::NoSuchElement {
            locator: locator.to_string(),
        }
    }

    fn submit(&mut self) {
        let target = self.target_input.clone();
        let amount_text = self.amount_input.clone();
        self.submissions.push((target.clone(), amount_text.clone()));

        if self.rejected.contains(&target) {
            self.flash = Some(REJECTION_TEXT.to_string());
            return;
        }

        let amount = parse_target_amount(&amount_text).expect("form amount must be numeric");
        let source = self.selected.first().cloned().expect("an account must be active");
        for account in &mut self.accounts {
            if account.name == source {
                account.credit -= amount;
            }
            if account.name == target {
                account.credit += amount;
            }
        }
        self.flash = Some(self.layout.confirmation_text.clone());
    }
}

impl WebDriver for FakeDashboard {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.calls.push(Call::Goto(url.to_string()));
        self.unfolded = false;
        self.flash = None;

        let switch_prefix = format!("{}/switch_user", self.layout.base_url);
        if url == self.layout.accounting_url() {
            self.page = Page::Accounting;
            self.amount_input.clear();
            self.target_input.clear();
        } else if url.starts_with(&switch_prefix) {
            if self.honor_switch {
                let parsed = Url::parse(url).expect("switch URL must be valid");
                let name = parsed
                    .query_pairs()
                    .find(|(key, _)| key == "selected_account")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                self.selected = vec![name];
            }
            self.page = Page::Dashboard;
        } else if url == self.layout.dashboard_url() {
            self.page = Page::Dashboard;
        } else {
            self.page = Page::Blank;
        }
        Ok(())
    }

    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, DriverError> {
        let layout = &self.layout;
        let id = if *locator == Locator::css(layout.unfold_link.as_str()) {
            (self.page == Page::Dashboard).then_some("unfold")
        } else if *locator == Locator::id(layout.amount_field.as_str()) {
            (self.page == Page::Accounting).then_some("field:amount")
        } else if *locator == Locator::id(layout.target_field.as_str()) {
            (self.page == Page::Accounting).then_some("field:target")
        } else if *locator == Locator::id(layout.submit_button.as_str()) {
            (self.page == Page::Accounting).then_some("button:submit")
        } else if *locator == Locator::id(layout.status_region.as_str()) {
            if let Some(error) = &self.status_error {
                return Err(error.clone());
            }
            self.flash.as_ref().map(|_| "flash")
        } else {
            None
        };

        id.map(ElementRef::new)
            .ok_or_else(|| Self::no_such_element(locator))
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        if *locator != Locator::css(self.layout.account_rows.as_str()) || !self.table_visible() {
            return Ok(vec![]);
        }

        let rows = self.accounts.len() + self.row_offset();
        Ok((0..rows)
            .map(|row| ElementRef::new(format!("row:{}", row)))
            .collect())
    }

    async fn find_all_within(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        let parts: Vec<&str> = parent.as_str().split(':').collect();
        match parts.as_slice() {
            ["row", row] if *locator == Locator::css(self.layout.account_cells.as_str()) => {
                let row: usize = row.parse().expect("row index");
                if self.account_at(row).is_none() {
                    return Ok(vec![]);
                }
                Ok((0..4)
                    .map(|column| ElementRef::new(format!("cell:{}:{}", row, column)))
                    .collect())
            }
            ["cell", row, "0"] if *locator == Locator::tag(self.layout.selected_marker.as_str()) => {
                let row: usize = row.parse().expect("row index");
                let marked = self
                    .account_at(row)
                    .is_some_and(|account| self.selected.contains(&account.name));
                Ok(if marked {
                    vec![ElementRef::new(format!("marker:{}", row))]
                } else {
                    vec![]
                })
            }
            _ => Ok(vec![]),
        }
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, DriverError> {
        let parts: Vec<&str> = element.as_str().split(':').collect();
        match parts.as_slice() {
            ["cell", row, column] => {
                let row: usize = row.parse().expect("row index");
                let account = self.account_at(row).ok_or(DriverError::Protocol {
                    error: "stale element reference".to_string(),
                    message: element.as_str().to_string(),
                })?;
                Ok(match *column {
                    "0" => account.name.clone(),
                    "1" => account.server.clone(),
                    "2" => match self.credit_texts.get(&account.name) {
                        Some(text) => text.clone(),
                        None => self.render(account.credit),
                    },
                    _ => self.render(account.price),
                })
            }
            ["flash"] => Ok(self.flash.clone().unwrap_or_default()),
            _ => Ok(String::new()),
        }
    }

    async fn clear(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        self.calls.push(Call::Clear(element.as_str().to_string()));
        match element.as_str() {
            "field:amount" => self.amount_input.clear(),
            "field:target" => self.target_input.clear(),
            _ => {}
        }
        Ok(())
    }

    async fn send_keys(&mut self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        self.calls
            .push(Call::SendKeys(element.as_str().to_string(), text.to_string()));
        match element.as_str() {
            "field:amount" => self.amount_input.push_str(text),
            "field:target" => self.target_input.push_str(text),
            _ => {}
        }
        Ok(())
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        self.calls.push(Call::Click(element.as_str().to_string()));
        match element.as_str() {
            "unfold" => self.unfolded = true,
            "button:submit" => self.submit(),
            _ => {}
        }
        Ok(())
    }

    async fn is_displayed(&mut self, _element: &ElementRef) -> Result<bool, DriverError> {
        Ok(true)
    }

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, DriverError> {
        // The submit button stays disabled until both fields are filled in
        if element.as_str() == "button:submit" {
            return Ok(!self.submit_disabled
                && !self.amount_input.is_empty()
                && !self.target_input.is_empty());
        }
        Ok(true)
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        self.calls.push(Call::Quit);
        if self.fail_quit {
            return Err(DriverError::Protocol {
                error: "invalid session id".to_string(),
                message: "session already gone".to_string(),
            });
        }
        Ok(())
    }
}
