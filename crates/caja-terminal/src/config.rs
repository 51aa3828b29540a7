//! # Terminal Configuration
//!
//! Identity and tuning of one terminal, loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CAJA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use caja_core::money::format_quetzales;

/// Default debounce for catalog search, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

/// Terminal configuration.
///
/// Branch and user come from the login flow in production; the env
/// overrides exist for development and kiosk provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalConfig {
    /// Branch this terminal sells from.
    pub branch_id: i64,

    /// Logged-in user.
    pub user_id: i64,

    /// Role string sent with every sale (e.g. "VENDEDOR").
    pub user_role: String,

    /// Device identifier attached to walk-in sales.
    pub device_imei: String,

    /// Base URL of the backend API.
    pub api_base_url: String,

    /// Quiet period for catalog search, in milliseconds.
    pub search_debounce_ms: u64,

    /// Currency symbol for display.
    pub currency_symbol: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            branch_id: 1,
            user_id: 0,
            user_role: "VENDEDOR".to_string(),
            device_imei: String::new(),
            api_base_url: "http://localhost:3000/api".to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            currency_symbol: "Q".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Creates a TerminalConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CAJA_BRANCH_ID`: Branch id (integer)
    /// - `CAJA_USER_ID`: User id (integer)
    /// - `CAJA_USER_ROLE`: Actor role string
    /// - `CAJA_DEVICE_IMEI`: Device identifier
    /// - `CAJA_API_URL`: Backend base URL
    /// - `CAJA_SEARCH_DEBOUNCE_MS`: Search quiet period
    ///
    /// A terminal without a provisioned IMEI gets a random UUID so
    /// walk-in sales still carry a stable device id for the session.
    pub fn from_env() -> Self {
        let mut config = TerminalConfig::default();

        if let Ok(value) = std::env::var("CAJA_BRANCH_ID") {
            if let Ok(id) = value.parse() {
                config.branch_id = id;
            }
        }

        if let Ok(value) = std::env::var("CAJA_USER_ID") {
            if let Ok(id) = value.parse() {
                config.user_id = id;
            }
        }

        if let Ok(role) = std::env::var("CAJA_USER_ROLE") {
            config.user_role = role;
        }

        if let Ok(imei) = std::env::var("CAJA_DEVICE_IMEI") {
            config.device_imei = imei;
        }

        if let Ok(url) = std::env::var("CAJA_API_URL") {
            config.api_base_url = url;
        }

        if let Ok(value) = std::env::var("CAJA_SEARCH_DEBOUNCE_MS") {
            if let Ok(ms) = value.parse() {
                config.search_debounce_ms = ms;
            }
        }

        if config.device_imei.is_empty() {
            config.device_imei = uuid::Uuid::new_v4().to_string();
        }

        config
    }

    /// Formats an amount for display with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = TerminalConfig::default();
    /// assert_eq!(config.format_amount(12.5), "Q12.50");
    /// ```
    pub fn format_amount(&self, amount: f64) -> String {
        if self.currency_symbol == "Q" {
            format_quetzales(amount)
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.branch_id, 1);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.user_role, "VENDEDOR");
    }

    #[test]
    fn test_format_amount() {
        let config = TerminalConfig::default();
        assert_eq!(config.format_amount(12.5), "Q12.50");
        assert_eq!(config.format_amount(0.0), "Q0.00");
    }

    #[test]
    fn test_env_imei_fallback_is_uuid() {
        // from_env reads the real environment, so only check the
        // fallback path indirectly: empty imei gets replaced.
        let config = TerminalConfig::from_env();
        assert!(!config.device_imei.is_empty());
    }
}
