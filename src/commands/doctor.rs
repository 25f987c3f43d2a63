// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx;
use crate::models::TransactionType;
use crate::session::Session;
use crate::storage::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;

/// Consistency checks over the active profile. Unknown currency codes are
/// the big one: conversion rejects them, so stored data carrying one makes
/// stats and goal views fail until it is fixed.
pub fn handle(store: impl Store) -> Result<()> {
    let session = Session::open(store)?;
    let ledger = &session.ledger;
    let mut rows = Vec::new();

    for t in &ledger.transactions {
        if !fx::is_known(&t.currency) {
            rows.push(vec![
                "txn_unknown_currency".to_string(),
                format!("{} {} ({})", t.date, t.currency, t.id),
            ]);
        }
        if t.exclude_from_balance && t.r#type != TransactionType::Savings {
            rows.push(vec![
                "exclude_flag_on_non_savings".to_string(),
                format!("{} ({})", t.date, t.id),
            ]);
        }
    }

    for g in &ledger.goals {
        if !fx::is_known(&g.currency) {
            rows.push(vec![
                "goal_unknown_currency".to_string(),
                format!("{} ({})", g.name, g.currency),
            ]);
        }
        if g.saved_amount < Decimal::ZERO {
            rows.push(vec![
                "goal_negative_saved".to_string(),
                format!("{} ({})", g.name, g.saved_amount),
            ]);
        }
    }

    // Allocated savings beyond the savings total means goal counters and the
    // transaction list have drifted apart.
    if ledger.transactions.iter().all(|t| fx::is_known(&t.currency))
        && ledger.goals.iter().all(|g| fx::is_known(&g.currency))
    {
        let total = ledger.stats()?.total_savings;
        let mut allocated = Decimal::ZERO;
        for g in &ledger.goals {
            allocated += fx::convert(g.saved_amount, &g.currency, &ledger.currency)?;
        }
        if allocated > total {
            rows.push(vec![
                "allocated_exceeds_savings".to_string(),
                format!("allocated {} > total {}", allocated.round_dp(2), total.round_dp(2)),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
