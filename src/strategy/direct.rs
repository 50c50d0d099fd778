//! Direct-switch strategy
//!
//! The older dashboard has no visible notion of a selected account. Its switch
//! endpoint is authoritative and idempotent, so it is called unconditionally
//! and its successful navigation is the only confirmation there is.

use crate::core::currency::CurrencyCodec;
use crate::core::session_builder::{SelectionTracking, SessionBuilder, SessionSettings};
use crate::dashboard::Dashboard;
use crate::driver::WebDriver;
use crate::io::Reporter;
use crate::strategy::SessionStrategy;
use crate::types::{BalanceError, Session};

/// Strategy for dashboards whose switch endpoint needs no verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectSwitchStrategy;

impl SessionStrategy for DirectSwitchStrategy {
    async fn open_session<D: WebDriver>(
        &self,
        dashboard: &mut Dashboard<'_, D>,
        settings: &SessionSettings,
        codec: &CurrencyCodec,
        reporter: &mut Reporter<'_>,
    ) -> Result<Session, BalanceError> {
        let builder = SessionBuilder::new(settings, codec, SelectionTracking::Ignored);

        reporter.switching_source()?;
        dashboard.switch_account(&settings.source).await?;
        dashboard.open().await?;

        let rows = dashboard.scrape_rows().await?;
        let session = builder.build(&rows)?;
        reporter.session_detected(&session)?;

        Ok(session)
    }
}
