//! Exchange-rate table for price conversion

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One directed conversion rate, `amount_in_to = amount_in_from * rate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
}

/// Directed exchange rates keyed by ISO currency code.
///
/// Currency codes compare case-insensitively. A pair with no entry converts
/// at 1, so the amount comes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates {
    rates: Vec<ExchangeRate>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::empty()
            .with_rate("EUR", "USD", Decimal::new(108, 2))
            .with_rate("USD", "EUR", Decimal::new(93, 2))
    }
}

impl ExchangeRates {
    /// Table with no rates
    #[must_use]
    pub fn empty() -> Self {
        Self { rates: Vec::new() }
    }

    /// Add or replace the rate for `from -> to`
    #[must_use]
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.set_rate(from, to, rate);
        self
    }

    /// Add or replace the rate for `from -> to`
    pub fn set_rate(&mut self, from: &str, to: &str, rate: Decimal) {
        match self.find_mut(from, to) {
            Some(existing) => existing.rate = rate,
            None => self.rates.push(ExchangeRate {
                from: from.to_ascii_uppercase(),
                to: to.to_ascii_uppercase(),
                rate,
            }),
        }
    }

    /// Rate for `from -> to`, if one is configured
    #[must_use]
    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates
            .iter()
            .find(|entry| matches_pair(entry, from, to))
            .map(|entry| entry.rate)
    }

    /// Convert `amount` from one currency to another
    #[must_use]
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Decimal {
        match self.rate(from, to) {
            Some(rate) => amount * rate,
            None => amount,
        }
    }

    /// Configured rates, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.iter()
    }

    fn find_mut(&mut self, from: &str, to: &str) -> Option<&mut ExchangeRate> {
        self.rates
            .iter_mut()
            .find(|entry| matches_pair(entry, from, to))
    }
}

fn matches_pair(entry: &ExchangeRate, from: &str, to: &str) -> bool {
    entry.from.eq_ignore_ascii_case(from) && entry.to.eq_ignore_ascii_case(to)
}
