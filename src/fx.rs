// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use rust_decimal::Decimal;

/// One row of the static conversion table. Rates are USD per one unit of the
/// currency, stored as (mantissa, scale) so the table can live in a const.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    rate_mantissa: i64,
    rate_scale: u32,
}

impl CurrencyInfo {
    pub fn usd_rate(&self) -> Decimal {
        Decimal::new(self.rate_mantissa, self.rate_scale)
    }
}

const fn c(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    rate_mantissa: i64,
    rate_scale: u32,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        name,
        symbol,
        rate_mantissa,
        rate_scale,
    }
}

pub const CURRENCIES: &[CurrencyInfo] = &[
    c("USD", "US Dollar", "$", 1, 0),
    c("BDT", "Bangladeshi Taka", "৳", 85, 4),
    c("EUR", "Euro", "€", 109, 2),
    c("GBP", "British Pound", "£", 127, 2),
    c("INR", "Indian Rupee", "₹", 12, 3),
    c("JPY", "Japanese Yen", "¥", 67, 4),
    c("CAD", "Canadian Dollar", "CA$", 73, 2),
    c("AUD", "Australian Dollar", "A$", 66, 2),
    c("CNY", "Chinese Yuan", "¥", 14, 2),
    c("SAR", "Saudi Riyal", "﷼", 2667, 4),
    c("AED", "UAE Dirham", "د.إ", 2723, 4),
    c("MYR", "Malaysian Ringgit", "RM", 21, 2),
];

pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code == code)
}

pub fn is_known(code: &str) -> bool {
    lookup(code).is_some()
}

pub fn symbol(code: &str) -> &'static str {
    lookup(code).map(|c| c.symbol).unwrap_or("$")
}

fn usd_rate(code: &str) -> Result<Decimal, Error> {
    lookup(code)
        .map(CurrencyInfo::usd_rate)
        .ok_or_else(|| Error::UnknownCurrency(code.to_string()))
}

/// Convert `amount` between two currency codes through the USD reference
/// unit. Identity conversions return the amount untouched so repeated
/// conversions to the same currency never accumulate rounding drift.
/// Unknown codes are rejected; there is deliberately no 1.0 fallback.
pub fn convert(amount: Decimal, from: &str, to: &str) -> Result<Decimal, Error> {
    if from == to {
        return Ok(amount);
    }
    let from_rate = usd_rate(from)?;
    let to_rate = usd_rate(to)?;
    Ok(amount * from_rate / to_rate)
}

/// Checks that a code is in the table, for validating user input before any
/// state is touched.
pub fn require_known(code: &str) -> Result<(), Error> {
    usd_rate(code).map(|_| ())
}
