// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use crate::fx;
use crate::models::{DashboardStats, Transaction, TransactionType};
use rust_decimal::Decimal;

/// Fold the transaction list into dashboard totals, converting every entry
/// into the display currency on the fly. Pure and order-independent: any
/// permutation of the list yields the same stats, and recomputation after a
/// mutation can never drift from the source list.
///
/// Savings entries flagged `exclude_from_balance` count toward
/// `total_savings` but are not deducted from `balance`.
pub fn compute_stats(
    transactions: &[Transaction],
    display_currency: &str,
) -> Result<DashboardStats, Error> {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut savings = Decimal::ZERO;
    let mut deducted = Decimal::ZERO;

    for t in transactions {
        let amount = fx::convert(t.amount, &t.currency, display_currency)?;
        match t.r#type {
            TransactionType::Income => income += amount,
            TransactionType::Expense => expense += amount,
            TransactionType::Savings => {
                savings += amount;
                if !t.exclude_from_balance {
                    deducted += amount;
                }
            }
        }
    }

    Ok(DashboardStats {
        total_income: income,
        total_expense: expense,
        total_savings: savings,
        balance: income - expense - deducted,
    })
}
