//! Decimal prices with an ISO 4217 currency.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Serialized as `{ "amount": "19.99", "currency_code": "SAR" }`; the amount
/// travels as a string so no precision is lost on the way through JSON/YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (riyals, not halalas).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Amount as `f64`, for numeric table sorting.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency_code.code())
    }
}

/// ISO 4217 currency codes the store sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    SAR,
    AED,
    KWD,
    EGP,
    USD,
}

impl CurrencyCode {
    /// The three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SAR => "SAR",
            Self::AED => "AED",
            Self::KWD => "KWD",
            Self::EGP => "EGP",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_two_decimals() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::SAR);
        assert_eq!(price.to_string(), "19.99 SAR");

        let whole = Price::new(Decimal::new(10, 0), CurrencyCode::USD);
        assert_eq!(whole.to_string(), "10.00 USD");
    }

    #[test]
    fn test_price_as_f64() {
        let price = Price::new(Decimal::new(250, 2), CurrencyCode::AED);
        assert!((price.as_f64() - 2.5).abs() < f64::EPSILON);
    }
}
