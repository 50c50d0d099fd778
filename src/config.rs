//! Run configuration
//!
//! A [`BalanceConfig`] holds everything a balancing run needs, already
//! validated. It is built from the command line by
//! [`CliArgs::to_balance_config`](crate::cli::CliArgs::to_balance_config), or
//! directly in tests.

use crate::cli::DashboardVariant;
use crate::core::currency::CurrencyCodec;
use crate::core::session_builder::SessionSettings;
use crate::dashboard::{DashboardLayout, DEFAULT_SETTLE_DELAY};
use crate::driver::WaitPolicy;
use crate::types::{Cents, ConfigError};
use crate::workflow::RunMode;
use reqwest::Url;
use std::time::Duration;

/// Default WebDriver server (geckodriver's default port)
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4444";

/// Validated configuration of one balancing run
#[derive(Debug, Clone)]
pub struct BalanceConfig {
    /// Source account and exclusions
    pub session: SessionSettings,
    /// Balance every fillable account is topped up to
    pub target_amount_in_cents: Cents,
    /// WebDriver server endpoint
    pub server_url: String,
    pub mode: RunMode,
    pub variant: DashboardVariant,
    pub layout: DashboardLayout,
    pub wait: WaitPolicy,
    /// Pause after unfolding the accounts table
    pub settle_delay: Duration,
    pub codec: CurrencyCodec,
}

impl BalanceConfig {
    /// Dry-run configuration against the uberspace dashboard with default timings
    pub fn new(session: SessionSettings, target_amount_in_cents: Cents) -> Self {
        BalanceConfig {
            session,
            target_amount_in_cents,
            server_url: DEFAULT_SERVER_URL.to_string(),
            mode: RunMode::DryRun,
            variant: DashboardVariant::Selected,
            layout: DashboardLayout::uberspace(),
            wait: WaitPolicy::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            codec: CurrencyCodec::default(),
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_variant(mut self, variant: DashboardVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_wait(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_layout(mut self, layout: DashboardLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Check that a URL is an absolute http(s) URL
pub fn validate_http_url(value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(value.trim_end_matches('/').to_string())
}
