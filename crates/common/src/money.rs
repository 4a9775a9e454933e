//! Monetary values as the platform reports them.

use serde::{Deserialize, Serialize};

/// A decimal-string amount paired with an ISO currency code.
///
/// Amounts stay as strings end to end; the platform is the only party that
/// does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: String,
    pub currency_code: String,
}

impl MoneyV2 {
    /// Creates a money value from an amount string and currency code.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Formats an amount in minor units (cents) as a two-decimal string.
    pub fn from_cents(cents: i64, currency_code: impl Into<String>) -> Self {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        Self::new(format!("{sign}{}.{:02}", abs / 100, abs % 100), currency_code)
    }

    /// Returns true if the amount parses to a value greater than zero.
    ///
    /// Unparseable amounts count as zero.
    pub fn is_positive(&self) -> bool {
        self.amount.trim().parse::<f64>().is_ok_and(|v| v > 0.0)
    }
}

/// The platform's money bag; only the shop-currency side is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub shop_money: MoneyV2,
}

impl MoneyBag {
    pub fn new(shop_money: MoneyV2) -> Self {
        Self { shop_money }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_formats_two_decimals() {
        assert_eq!(MoneyV2::from_cents(1250, "USD").amount, "12.50");
        assert_eq!(MoneyV2::from_cents(5, "USD").amount, "0.05");
        assert_eq!(MoneyV2::from_cents(0, "USD").amount, "0.00");
        assert_eq!(MoneyV2::from_cents(-199, "USD").amount, "-1.99");
    }

    #[test]
    fn positivity() {
        assert!(MoneyV2::new("0.01", "USD").is_positive());
        assert!(!MoneyV2::new("0.00", "USD").is_positive());
        assert!(!MoneyV2::new("0", "USD").is_positive());
        assert!(!MoneyV2::new("", "USD").is_positive());
        assert!(!MoneyV2::new("abc", "USD").is_positive());
    }

    #[test]
    fn money_bag_uses_platform_field_names() {
        let bag = MoneyBag::new(MoneyV2::new("10.00", "CAD"));
        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(json["shopMoney"]["amount"], "10.00");
        assert_eq!(json["shopMoney"]["currencyCode"], "CAD");
    }
}
