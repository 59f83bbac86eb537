//! Money type for representing listing prices.
//!
//! Listings are priced in Iraqi dinars, which carry no fractional part, so an
//! amount is a whole number of dinars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Iraqi dinar.
    #[default]
    IQD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IQD => "IQD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    /// Dinar amount.
    pub fn iqd(amount: i64) -> Self {
        Self {
            amount,
            currency: Currency::IQD,
        }
    }

    /// Format with thousands separators, e.g. "85,000 IQD".
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let amount = group_thousands(self.amount.unsigned_abs());
        format!("{sign}{amount} {}", self.currency.code())
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dinar_display() {
        assert_eq!(Money::iqd(85_000).display(), "85,000 IQD");
        assert_eq!(Money::iqd(180_000).display(), "180,000 IQD");
        assert_eq!(Money::iqd(950).display(), "950 IQD");
        assert_eq!(Money::iqd(1_250_000).to_string(), "1,250,000 IQD");
        assert_eq!(Money::iqd(-15_000).display(), "-15,000 IQD");
    }
}
