//! Dashboard adapter
//!
//! Translates the balancer's needs (read the accounts table, switch the active
//! account, transfer money) into WebDriver interactions against the page
//! layout described by [`DashboardLayout`].

use crate::core::currency::format_major_units;
use crate::driver::{wait_for_clickable, wait_for_text, Locator, WaitError, WaitPolicy, WebDriver};
use crate::types::{Account, BalanceError, Cents, ScrapedRow};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

pub mod layout;

pub use layout::{DashboardLayout, UBERSPACE_DASHBOARD_URL};

/// Default wait for the accounts table slide-down animation
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// A browser session pointed at the dashboard
pub struct Dashboard<'a, D: WebDriver> {
    driver: &'a mut D,
    layout: &'a DashboardLayout,
    wait: WaitPolicy,
    settle_delay: Duration,
}

impl<'a, D: WebDriver> Dashboard<'a, D> {
    pub fn new(
        driver: &'a mut D,
        layout: &'a DashboardLayout,
        wait: WaitPolicy,
        settle_delay: Duration,
    ) -> Self {
        Dashboard {
            driver,
            layout,
            wait,
            settle_delay,
        }
    }

    /// Navigate to the dashboard start page
    pub async fn open(&mut self) -> Result<(), BalanceError> {
        self.driver.goto(&self.layout.dashboard_url()).await?;
        Ok(())
    }

    /// Slide down the accounts table and wait for the animation to finish
    pub async fn unfold_accounts(&mut self) -> Result<(), BalanceError> {
        let link = self
            .driver
            .find(&Locator::css(self.layout.unfold_link.as_str()))
            .await?;
        self.driver.click(&link).await?;

        sleep(self.settle_delay).await;
        Ok(())
    }

    /// Ask the dashboard to make the given account the active one
    pub async fn switch_account(&mut self, account_name: &str) -> Result<(), BalanceError> {
        let url = self.layout.switch_account_url(account_name)?;
        info!(account = account_name, "Switching dashboard account");
        self.driver.goto(&url).await?;
        Ok(())
    }

    /// Read every row of the accounts table on the current page
    ///
    /// The selected flag of a row is set when its first cell contains the
    /// layout's selection marker.
    pub async fn scrape_rows(&mut self) -> Result<Vec<ScrapedRow>, BalanceError> {
        let rows = self
            .driver
            .find_all(&Locator::css(self.layout.account_rows.as_str()))
            .await?;
        let cell_locator = Locator::css(self.layout.account_cells.as_str());
        let marker_locator = Locator::tag(self.layout.selected_marker.as_str());

        let mut scraped = Vec::with_capacity(rows.len());
        for row in &rows {
            let cells = self.driver.find_all_within(row, &cell_locator).await?;

            let mut columns = Vec::with_capacity(cells.len());
            for cell in &cells {
                columns.push(self.driver.text(cell).await?);
            }

            let selected = match cells.first() {
                Some(name_cell) => !self
                    .driver
                    .find_all_within(name_cell, &marker_locator)
                    .await?
                    .is_empty(),
                None => false,
            };

            debug!(?columns, selected, "Scraped account row");
            scraped.push(ScrapedRow { columns, selected });
        }

        Ok(scraped)
    }

    /// Transfer money from the active account to the given account
    ///
    /// Fills in and submits the transfer form, then waits for the dashboard's
    /// confirmation. Nothing is retried: a second submit could transfer twice.
    ///
    /// # Errors
    ///
    /// * `TransferConfirmation` if the submit button never becomes clickable or
    ///   the confirmation text does not appear within the wait timeout
    /// * `Driver` if the browser fails in any other way
    pub async fn transfer(
        &mut self,
        account: &Account,
        amount_in_cents: Cents,
    ) -> Result<(), BalanceError> {
        self.driver.goto(&self.layout.accounting_url()).await?;

        let amount_field = self
            .driver
            .find(&Locator::id(self.layout.amount_field.as_str()))
            .await?;
        self.driver.clear(&amount_field).await?;
        self.driver
            .send_keys(&amount_field, &format_major_units(amount_in_cents))
            .await?;

        let target_field = self
            .driver
            .find(&Locator::id(self.layout.target_field.as_str()))
            .await?;
        self.driver.clear(&target_field).await?;
        self.driver.send_keys(&target_field, account.name()).await?;

        let submit = wait_for_clickable(
            &mut *self.driver,
            &Locator::id(self.layout.submit_button.as_str()),
            &self.wait,
        )
        .await
        .map_err(|error| confirmation_error(account, error))?;
        self.driver.click(&submit).await?;

        wait_for_text(
            &mut *self.driver,
            &Locator::id(self.layout.status_region.as_str()),
            &self.layout.confirmation_text,
            &self.wait,
        )
        .await
        .map_err(|error| confirmation_error(account, error))?;

        Ok(())
    }
}

fn confirmation_error(account: &Account, error: WaitError) -> BalanceError {
    match error {
        WaitError::Driver(error) => BalanceError::Driver(error),
        timed_out => BalanceError::transfer_confirmation(account.name(), timed_out.to_string()),
    }
}
