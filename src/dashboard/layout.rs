//! DOM contract with the hosting dashboard
//!
//! URLs, element ids, selectors and the confirmation text are dictated by the
//! dashboard. A change on their side is an input format change: update the
//! layout here rather than working around it elsewhere.

use crate::types::ConfigError;
use reqwest::Url;

/// Pages, selectors and texts of one dashboard version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    /// Dashboard start page, without trailing slash
    pub base_url: String,
    /// Rows of the accounts table
    pub account_rows: String,
    /// Data cells within an account row
    pub account_cells: String,
    /// Tag nested in the name cell of the currently selected account
    pub selected_marker: String,
    /// Link that slides down the accounts table
    pub unfold_link: String,
    /// Id of the transfer amount input
    pub amount_field: String,
    /// Id of the transfer target account input
    pub target_field: String,
    /// Id of the transfer submit button
    pub submit_button: String,
    /// Id of the status message region
    pub status_region: String,
    /// Status text shown after a successful transfer
    pub confirmation_text: String,
}

pub const UBERSPACE_DASHBOARD_URL: &str = "https://dashboard.uberspace.de/dashboard";

impl DashboardLayout {
    /// Layout of the uberspace.de dashboard
    pub fn uberspace() -> Self {
        DashboardLayout {
            base_url: UBERSPACE_DASHBOARD_URL.to_string(),
            account_rows: "#otheraccounttable tbody tr".to_string(),
            account_cells: "td".to_string(),
            selected_marker: "strong".to_string(),
            unfold_link: ".otheraccount > a:first-child".to_string(),
            amount_field: "transfer_money".to_string(),
            target_field: "uberspace_target".to_string(),
            submit_button: "umbuchen_button".to_string(),
            status_region: "flash".to_string(),
            confirmation_text: "Wir haben den Betrag wunschgemäß umgebucht.".to_string(),
        }
    }

    /// Same layout served from a different base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn dashboard_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn accounting_url(&self) -> String {
        format!("{}/accounting", self.base_url)
    }

    /// URL that makes the given account the dashboard's active account
    ///
    /// The account name is query-encoded.
    pub fn switch_account_url(&self, account_name: &str) -> Result<String, ConfigError> {
        let endpoint = format!("{}/switch_user", self.base_url);
        Url::parse_with_params(&endpoint, &[("selected_account", account_name)])
            .map(String::from)
            .map_err(|e| ConfigError::InvalidUrl {
                value: endpoint,
                reason: e.to_string(),
            })
    }
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self::uberspace()
    }
}
