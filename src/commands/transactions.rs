// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionType};
use crate::session::Session;
use crate::storage::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_bool, parse_date, parse_decimal, parse_month, pretty_table,
    today,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let mut session = Session::open(store)?;
    match m.subcommand() {
        Some(("add", sub)) => add(&mut session, sub)?,
        Some(("edit", sub)) => edit(&mut session, sub)?,
        Some(("rm", sub)) => rm(&mut session, sub)?,
        Some(("list", sub)) => list(&session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let ty = TransactionType::parse(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().clone();
    let note = sub.get_one::<String>("note").cloned();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let exclude = sub.get_flag("exclude-from-balance");

    let tx = session.add_transaction(amount, &category, note, ty, date, exclude)?;
    println!(
        "Recorded {} {} '{}' on {} (id: {})",
        tx.r#type,
        fmt_money(&tx.amount, &tx.currency),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

fn edit(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let existing = session.ledger.transaction(id)?.clone();

    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => existing.amount,
    };
    let ty = match sub.get_one::<String>("type") {
        Some(s) => TransactionType::parse(s)?,
        None => existing.r#type,
    };
    let category = sub
        .get_one::<String>("category")
        .cloned()
        .unwrap_or(existing.category);
    let note = sub.get_one::<String>("note").cloned().or(existing.note);
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => existing.date,
    };
    let exclude = match sub.get_one::<String>("exclude-from-balance") {
        Some(s) => parse_bool(s)?,
        None => existing.exclude_from_balance,
    };

    let tx = session.update_transaction(id, amount, &category, note, ty, date, exclude)?;
    println!("Updated transaction {}", tx.id);
    Ok(())
}

fn rm(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let tx = session.remove_transaction(id)?;
    println!(
        "Deleted {} {} '{}' from {}",
        tx.r#type,
        fmt_money(&tx.amount, &tx.currency),
        tx.category,
        tx.date
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub currency: String,
    pub display_amount: String,
    pub note: String,
}

/// Rows for `tx list`, converted on the fly into the display currency.
pub fn query_rows(
    session: &Session<impl Store>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let ty = match sub.get_one::<String>("type") {
        Some(t) => Some(TransactionType::parse(t)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied();

    let display = session.ledger.currency.clone();
    let mut rows = Vec::new();
    for t in &session.ledger.transactions {
        if let Some(ref m) = month {
            if !t.date.to_string().starts_with(m.as_str()) {
                continue;
            }
        }
        if let Some(want) = ty {
            if t.r#type != want {
                continue;
            }
        }
        rows.push(to_row(t, &display)?);
        if let Some(n) = limit {
            if rows.len() >= n {
                break;
            }
        }
    }
    Ok(rows)
}

fn to_row(t: &Transaction, display: &str) -> Result<TransactionRow> {
    let converted = crate::fx::convert(t.amount, &t.currency, display)?;
    Ok(TransactionRow {
        id: t.id.clone(),
        date: t.date.to_string(),
        r#type: t.r#type.to_string(),
        category: t.category.clone(),
        amount: t.amount.round_dp(2).to_string(),
        currency: t.currency.clone(),
        display_amount: fmt_money(&converted, display),
        note: t.note.clone().unwrap_or_default(),
    })
}

fn list(session: &Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.display_amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Amount", "CCY", "Display", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
