//! # Price Conversion
//!
//! Converts listed publication prices into the commerce platform's
//! settlement currency.
//!
//! ## Conversion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PriceConverter                                    │
//! │                                                                         │
//! │  Price { 100.00 USD } ── rate 6.96 ──► 696.00 (settlement)             │
//! │  Price { 150.00 BOB } ── already settlement ──► 150.00 unchanged       │
//! │                                                                         │
//! │  Rounding: half-up to the cent, applied exactly once.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The exchange rate is injected configuration - this module never sources
//! rates itself.

use crate::money::Money;
use crate::types::Price;

// =============================================================================
// Price Converter
// =============================================================================

/// Pure converter from listed prices to settlement-currency amounts.
///
/// Deterministic for a fixed `(amount, rate)` pair; no side effects.
#[derive(Debug, Clone)]
pub struct PriceConverter {
    exchange_rate: f64,
    settlement_currency: String,
}

impl PriceConverter {
    /// Creates a converter for the given exchange rate and settlement
    /// currency code.
    pub fn new(exchange_rate: f64, settlement_currency: impl Into<String>) -> Self {
        PriceConverter {
            exchange_rate,
            settlement_currency: settlement_currency.into(),
        }
    }

    /// Converts a price into the settlement currency.
    ///
    /// Prices already listed in the settlement currency pass through
    /// unchanged. Everything else is multiplied by the configured rate and
    /// rounded half-up to the nearest cent.
    pub fn convert(&self, price: &Price) -> Money {
        if self.is_settlement(&price.currency) {
            price.amount
        } else {
            let cents = (price.amount.cents() as f64 * self.exchange_rate).round();
            Money::from_cents(cents as i64)
        }
    }

    /// True when the given currency code is the settlement currency.
    pub fn is_settlement(&self, currency: &str) -> bool {
        currency == self.settlement_currency
    }

    /// The configured exchange rate.
    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
