// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::stats::compute_stats;
use crate::storage::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let session = Session::open(store)?;
    let display = m
        .get_one::<String>("currency")
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| session.ledger.currency.clone());

    let stats = compute_stats(&session.ledger.transactions, &display)?;
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&stats.total_income, &display)],
            vec!["Expense".to_string(), fmt_money(&stats.total_expense, &display)],
            vec!["Savings".to_string(), fmt_money(&stats.total_savings, &display)],
            vec!["Balance".to_string(), fmt_money(&stats.balance, &display)],
        ];
        let header = format!("{} ({})", session.profile.name, display);
        println!("{}", pretty_table(&[header.as_str(), "Total"], rows));
    }
    Ok(())
}
