//! Session strategy module
//!
//! The dashboard has shipped in two versions that differ in how the account
//! money is drawn from gets chosen. This module defines the Strategy pattern
//! for establishing a validated session on either version, so the balancing
//! engine and transfer workflow stay the same for both.

use crate::cli::DashboardVariant;
use crate::core::currency::CurrencyCodec;
use crate::core::session_builder::SessionSettings;
use crate::dashboard::Dashboard;
use crate::driver::WebDriver;
use crate::io::Reporter;
use crate::types::{BalanceError, Session};

pub mod direct;
pub mod selected;

pub use direct::DirectSwitchStrategy;
pub use selected::SelectedAccountStrategy;

/// Strategy for opening a balancing session on the dashboard
///
/// On success the dashboard's active account is the configured source
/// account, so that transfers draw money from it.
#[allow(async_fn_in_trait)]
pub trait SessionStrategy {
    /// Bring the dashboard into the source account's context and scrape a session
    ///
    /// # Errors
    ///
    /// Any session validation error, `Consistency` if the dashboard ends up
    /// on a different account, or a driver error.
    async fn open_session<D: WebDriver>(
        &self,
        dashboard: &mut Dashboard<'_, D>,
        settings: &SessionSettings,
        codec: &CurrencyCodec,
        reporter: &mut Reporter<'_>,
    ) -> Result<Session, BalanceError>;
}

/// Runtime-selected session strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardStrategy {
    SelectedAccount(SelectedAccountStrategy),
    DirectSwitch(DirectSwitchStrategy),
}

impl SessionStrategy for DashboardStrategy {
    async fn open_session<D: WebDriver>(
        &self,
        dashboard: &mut Dashboard<'_, D>,
        settings: &SessionSettings,
        codec: &CurrencyCodec,
        reporter: &mut Reporter<'_>,
    ) -> Result<Session, BalanceError> {
        match self {
            DashboardStrategy::SelectedAccount(strategy) => {
                strategy
                    .open_session(dashboard, settings, codec, reporter)
                    .await
            }
            DashboardStrategy::DirectSwitch(strategy) => {
                strategy
                    .open_session(dashboard, settings, codec, reporter)
                    .await
            }
        }
    }
}

/// Create a session strategy for the given dashboard version
///
/// # Arguments
///
/// * `variant` - Which dashboard version is being automated
///
/// # Returns
///
/// The strategy implementing that version's account switching
pub fn create_strategy(variant: DashboardVariant) -> DashboardStrategy {
    match variant {
        DashboardVariant::Selected => DashboardStrategy::SelectedAccount(SelectedAccountStrategy),
        DashboardVariant::Direct => DashboardStrategy::DirectSwitch(DirectSwitchStrategy),
    }
}
