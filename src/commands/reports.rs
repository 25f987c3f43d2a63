// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx;
use crate::models::TransactionType;
use crate::session::Session;
use crate::storage::Store;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let session = Session::open(store)?;
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(&session, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(&session, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(session: &Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let display = &session.ledger.currency;

    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in &session.ledger.transactions {
        let month = t.date.format("%Y-%m").to_string();
        let amount = fx::convert(t.amount, &t.currency, display)?;
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.r#type {
            TransactionType::Income => entry.0 += amount,
            TransactionType::Expense => entry.1 += amount,
            TransactionType::Savings => {}
        }
    }

    let mut data = Vec::new();
    for (month, (income, expense)) in map.iter().rev().take(months) {
        data.push(vec![
            month.clone(),
            format!("{:.2}", income),
            format!("{:.2}", expense),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn spend_by_category(session: &Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let display = &session.ledger.currency;

    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in &session.ledger.transactions {
        if t.r#type != TransactionType::Expense || !t.date.to_string().starts_with(&month) {
            continue;
        }
        let amount = fx::convert(t.amount, &t.currency, display)?;
        *agg.entry(t.category.clone()).or_insert(Decimal::ZERO) += amount;
    }

    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let header = format!("Spent ({})", display);
        println!("{}", pretty_table(&["Category", header.as_str()], data));
    }
    Ok(())
}
