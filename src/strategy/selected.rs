//! Selected-account strategy
//!
//! The current dashboard scopes everything to an "active" account, marked in
//! the accounts table. The table is folded away by default and has to be
//! slid down before it can be read.
//!
//! # Flow
//!
//! 1. Open the dashboard, unfold the accounts table, scrape a session that
//!    requires exactly one selected account
//! 2. If the source account is not the selected one, call the switch
//!    endpoint, unfold again and scrape a fresh session
//! 3. Verify the fresh session has the source account selected

use crate::core::currency::CurrencyCodec;
use crate::core::session_builder::{SelectionTracking, SessionBuilder, SessionSettings};
use crate::dashboard::Dashboard;
use crate::driver::WebDriver;
use crate::io::Reporter;
use crate::strategy::SessionStrategy;
use crate::types::{BalanceError, Session};
use tracing::info;

/// Strategy for dashboards that mark the currently selected account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedAccountStrategy;

impl SelectedAccountStrategy {
    async fn scrape<D: WebDriver>(
        dashboard: &mut Dashboard<'_, D>,
        builder: &SessionBuilder<'_>,
        reporter: &mut Reporter<'_>,
    ) -> Result<Session, BalanceError> {
        dashboard.unfold_accounts().await?;
        let rows = dashboard.scrape_rows().await?;
        let session = builder.build(&rows)?;
        reporter.session_detected(&session)?;
        Ok(session)
    }
}

impl SessionStrategy for SelectedAccountStrategy {
    async fn open_session<D: WebDriver>(
        &self,
        dashboard: &mut Dashboard<'_, D>,
        settings: &SessionSettings,
        codec: &CurrencyCodec,
        reporter: &mut Reporter<'_>,
    ) -> Result<Session, BalanceError> {
        let builder = SessionBuilder::new(settings, codec, SelectionTracking::Required);

        dashboard.open().await?;
        let session = Self::scrape(dashboard, &builder, reporter).await?;

        if session.is_source_account_selected() {
            return Ok(session);
        }

        reporter.switching_source()?;
        dashboard
            .switch_account(session.source_account().name())
            .await?;

        // The table may have changed while switching; only the fresh scrape counts
        let switched = Self::scrape(dashboard, &builder, reporter).await?;
        if !switched.is_source_account_selected() {
            let actual = switched
                .selected_account()
                .map(|account| account.name().to_string())
                .unwrap_or_default();
            return Err(BalanceError::consistency(&settings.source, &actual));
        }

        info!(account = %settings.source, "Source account is selected");
        Ok(switched)
    }
}
