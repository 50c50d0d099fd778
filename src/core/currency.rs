//! Currency formatting and parsing
//!
//! All amounts inside the balancer are integer minor units (cents). This module
//! converts between those and the locale-formatted strings the dashboard shows,
//! using `rust_decimal` so that no floating point is ever involved.

use crate::types::{BalanceError, Cents, ConfigError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Locale-specific number and currency presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyLocale {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub symbol: String,
    pub code: String,
    /// `true` renders `12,50 €`, `false` renders `€12.50`
    pub symbol_after: bool,
}

impl CurrencyLocale {
    /// German formatting of euros, as shown by the dashboard
    pub fn de_de() -> Self {
        CurrencyLocale {
            decimal_separator: ',',
            grouping_separator: '.',
            symbol: "€".to_string(),
            code: "EUR".to_string(),
            symbol_after: true,
        }
    }

    pub fn en_us() -> Self {
        CurrencyLocale {
            decimal_separator: '.',
            grouping_separator: ',',
            symbol: "$".to_string(),
            code: "USD".to_string(),
            symbol_after: false,
        }
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        Self::de_de()
    }
}

/// Converts between minor units and display strings for one currency and locale
#[derive(Debug, Clone, Default)]
pub struct CurrencyCodec {
    locale: CurrencyLocale,
}

impl CurrencyCodec {
    pub fn new(locale: CurrencyLocale) -> Self {
        CurrencyCodec { locale }
    }

    /// Render an amount of minor units as a currency string
    ///
    /// ```
    /// use uberspace_balancer::core::CurrencyCodec;
    ///
    /// let codec = CurrencyCodec::default();
    /// assert_eq!(codec.format(123456), "1.234,56 €");
    /// assert_eq!(codec.format(-1250), "-12,50 €");
    /// ```
    pub fn format(&self, amount_in_cents: Cents) -> String {
        let magnitude = amount_in_cents.unsigned_abs();
        let major = group_digits(magnitude / 100, self.locale.grouping_separator);
        let number = format!(
            "{}{}{}{:02}",
            if amount_in_cents < 0 { "-" } else { "" },
            major,
            self.locale.decimal_separator,
            magnitude % 100
        );

        if self.locale.symbol_after {
            format!("{} {}", number, self.locale.symbol)
        } else {
            format!("{}{}", self.locale.symbol, number)
        }
    }

    /// Parse a currency string into minor units
    ///
    /// Any Unicode space (the dashboard emits non-breaking spaces in its currency
    /// cells) is treated as a plain space. Digits beyond the second fractional
    /// place are truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::Parse` when the string does not contain a number
    /// in the configured locale, or the amount does not fit into 64 bits.
    pub fn parse(&self, display: &str) -> Result<Cents, BalanceError> {
        let normalized: String = display
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        let stripped = normalized
            .replace(self.locale.symbol.as_str(), "")
            .replace(self.locale.code.as_str(), "");
        let mut number = stripped.trim();

        let negative = match number.chars().next() {
            Some('-') | Some('\u{2212}') => {
                let sign_len = number.chars().next().map_or(0, char::len_utf8);
                number = number[sign_len..].trim_start();
                true
            }
            _ => false,
        };

        if number.is_empty() {
            return Err(BalanceError::parse(display, "no amount found"));
        }

        let mut canonical = String::with_capacity(number.len());
        let mut seen_decimal = false;
        for c in number.chars() {
            if c.is_ascii_digit() {
                canonical.push(c);
            } else if c == self.locale.decimal_separator && !seen_decimal {
                seen_decimal = true;
                canonical.push('.');
            } else if c == self.locale.grouping_separator && !seen_decimal {
                continue;
            } else {
                return Err(BalanceError::parse(
                    display,
                    &format!("unexpected character '{}'", c),
                ));
            }
        }

        if !canonical.chars().any(|c| c.is_ascii_digit()) {
            return Err(BalanceError::parse(display, "no digits found"));
        }

        let mut value = Decimal::from_str(&canonical)
            .map_err(|e| BalanceError::parse(display, &e.to_string()))?;
        if negative {
            value = -value;
        }

        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.trunc().to_i64())
            .ok_or_else(|| BalanceError::parse(display, "amount out of range"))
    }
}

/// Render minor units as a plain major-unit number for form input
///
/// Uses `.` as decimal separator and drops trailing zeros, so 700 becomes
/// `7`, 750 becomes `7.5` and 1234 becomes `12.34`.
pub fn format_major_units(amount_in_cents: Cents) -> String {
    Decimal::new(amount_in_cents, 2).normalize().to_string()
}

/// Parse a target amount given in major units into minor units
///
/// Accepts `.` or `,` as decimal separator. The amount must be non-negative
/// and have at most two decimal places.
pub fn parse_target_amount(value: &str) -> Result<Cents, ConfigError> {
    let trimmed = value.trim();
    let canonical = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    if canonical.is_empty() || !canonical.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return Err(ConfigError::invalid_amount(value, "not a decimal number"));
    }

    let amount = Decimal::from_str(&canonical)
        .map_err(|e| ConfigError::invalid_amount(value, &e.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConfigError::invalid_amount(value, "must not be negative"));
    }
    if amount.normalize().scale() > 2 {
        return Err(ConfigError::invalid_amount(
            value,
            "at most two decimal places are supported",
        ));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| ConfigError::invalid_amount(value, "amount out of range"))
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}
