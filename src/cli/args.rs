use crate::config::{validate_http_url, BalanceConfig, DEFAULT_SERVER_URL};
use crate::core::currency::parse_target_amount;
use crate::core::session_builder::SessionSettings;
use crate::dashboard::{DashboardLayout, UBERSPACE_DASHBOARD_URL};
use crate::driver::WaitPolicy;
use crate::types::ConfigError;
use crate::workflow::RunMode;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Fill up uberspace accounts from a source account
#[derive(Parser, Debug)]
#[command(name = "uberspace-balancer")]
#[command(about = "Fill up uberspace accounts to a target balance from a source account", long_about = None)]
pub struct CliArgs {
    /// Name of the account money is transferred from
    #[arg(value_name = "SOURCE", help = "The name of the source account from which the money should be transferred")]
    pub source: String,

    /// Balance to fill every other account up to, in euros
    #[arg(value_name = "AMOUNT", help = "The amount to which the accounts should be filled up")]
    pub amount: String,

    /// WebDriver server endpoint
    #[arg(
        short = 'u',
        long = "server-url",
        value_name = "URL",
        default_value = DEFAULT_SERVER_URL,
        help = "The geckodriver server URL"
    )]
    pub server_url: String,

    /// Transfer money for real
    #[arg(
        short = 'x',
        long = "execute",
        help = "If provided, the accounts are filled up for real. Otherwise only information is displayed"
    )]
    pub execute: bool,

    /// Accounts to skip entirely
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "NAME",
        help = "Account to leave untouched (case-insensitive, repeatable)"
    )]
    pub exclude: Vec<String>,

    /// Dashboard start page
    #[arg(
        long = "dashboard-url",
        value_name = "URL",
        default_value = UBERSPACE_DASHBOARD_URL,
        help = "Base URL of the dashboard"
    )]
    pub dashboard_url: String,

    /// Dashboard version to automate
    #[arg(
        long = "variant",
        value_name = "VARIANT",
        default_value = "selected",
        help = "Dashboard variant: 'selected' marks the active account, 'direct' switches without verification"
    )]
    pub variant: DashboardVariant,

    /// Seconds to wait for the dashboard to confirm a transfer
    #[arg(
        long = "wait-timeout",
        value_name = "SECS",
        default_value_t = 30,
        help = "Seconds to wait for the transfer form and its confirmation (no retries)"
    )]
    pub wait_timeout: u64,

    /// Milliseconds to wait after unfolding the accounts table
    #[arg(
        long = "settle-delay",
        value_name = "MILLIS",
        default_value_t = 1000,
        help = "Milliseconds to wait for the accounts table animation"
    )]
    pub settle_delay: u64,
}

/// Dashboard versions with different account switching
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DashboardVariant {
    /// The dashboard marks the active account; switching is verified
    Selected,
    /// The switch endpoint is authoritative; no verification
    Direct,
}

impl CliArgs {
    /// Create a BalanceConfig from CLI arguments
    ///
    /// Validates the target amount, the URLs and the wait timeout.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn to_balance_config(&self) -> Result<BalanceConfig, ConfigError> {
        let target_amount_in_cents = parse_target_amount(&self.amount)?;
        let server_url = validate_http_url(&self.server_url)?;
        let dashboard_url = validate_http_url(&self.dashboard_url)?;

        if self.wait_timeout == 0 {
            return Err(ConfigError::InvalidDuration {
                name: "wait timeout".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }

        let session = SessionSettings::new(self.source.clone(), self.exclude.clone());
        let wait = WaitPolicy {
            timeout: Duration::from_secs(self.wait_timeout),
            ..WaitPolicy::default()
        };

        let mut config = BalanceConfig::new(session, target_amount_in_cents)
            .with_mode(RunMode::from_execute_flag(self.execute))
            .with_variant(self.variant)
            .with_wait(wait)
            .with_settle_delay(Duration::from_millis(self.settle_delay))
            .with_layout(DashboardLayout::uberspace().with_base_url(&dashboard_url));
        config.server_url = server_url;

        Ok(config)
    }
}
