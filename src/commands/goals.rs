// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use crate::ledger::SavingsTarget;
use crate::session::Session;
use crate::storage::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_bool, parse_date, parse_decimal, pretty_table, today,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let mut session = Session::open(store)?;
    match m.subcommand() {
        Some(("add", sub)) => add(&mut session, sub)?,
        Some(("list", sub)) => list(&session, sub)?,
        Some(("edit", sub)) => edit(&mut session, sub)?,
        Some(("rm", sub)) => rm(&mut session, sub)?,
        Some(("deposit", sub)) => deposit(&mut session, sub)?,
        Some(("withdraw", sub)) => withdraw(&mut session, sub)?,
        _ => {}
    }
    Ok(())
}

fn goal_id_by_name(session: &Session<impl Store>, name: &str) -> Result<String> {
    session
        .ledger
        .find_goal_by_name(name)
        .map(|g| g.id.clone())
        .ok_or_else(|| Error::GoalNotFound(name.to_string()).into())
}

fn add(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let category = sub
        .get_one::<String>("category")
        .cloned()
        .unwrap_or_else(|| "Goal Saving".to_string());
    let fixed = sub.get_flag("fixed-deposit");

    session.create_goal(&name, target, &category, fixed)?;
    let ccy = session.ledger.currency.clone();
    println!(
        "Created goal '{}' targeting {}{}",
        name,
        fmt_money(&target, &ccy),
        if fixed { " (fixed deposit)" } else { "" }
    );
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    name: String,
    category: String,
    target: String,
    saved: String,
    progress: String,
    fixed_deposit: bool,
}

fn list(session: &Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let general = session.ledger.general_savings()?;
    let mut data = Vec::new();
    for g in &session.ledger.goals {
        let pct = if g.target_amount.is_zero() {
            Decimal::ZERO
        } else {
            (g.saved_amount / g.target_amount * Decimal::new(100, 0)).round_dp(0)
        };
        data.push(GoalRow {
            name: g.name.clone(),
            category: g.category.clone(),
            target: fmt_money(&g.target_amount, &g.currency),
            saved: fmt_money(&g.saved_amount, &g.currency),
            progress: format!("{}%", pct),
            fixed_deposit: g.is_fixed_deposit,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "General savings (unallocated): {}",
            fmt_money(&general, &session.ledger.currency)
        );
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.category,
                    r.target,
                    r.saved,
                    r.progress,
                    if r.fixed_deposit { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Category", "Target", "Saved", "Progress", "FD"], rows)
        );
    }
    Ok(())
}

fn edit(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = goal_id_by_name(session, name)?;
    let existing = session.ledger.goal(&id)?.clone();

    let new_name = sub
        .get_one::<String>("rename")
        .cloned()
        .unwrap_or(existing.name);
    let target = match sub.get_one::<String>("target") {
        Some(s) => parse_decimal(s)?,
        None => existing.target_amount,
    };
    let category = sub
        .get_one::<String>("category")
        .cloned()
        .unwrap_or(existing.category);
    let fixed = match sub.get_one::<String>("fixed-deposit") {
        Some(s) => parse_bool(s)?,
        None => existing.is_fixed_deposit,
    };

    session.update_goal(&id, &new_name, target, &category, fixed)?;
    println!("Updated goal '{}'", new_name);
    Ok(())
}

fn rm(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = goal_id_by_name(session, name)?;
    session.delete_goal(&id)?;
    println!("Deleted goal '{}' (its savings history remains in the ledger)", name);
    Ok(())
}

fn target_from_args(
    session: &Session<impl Store>,
    sub: &clap::ArgMatches,
) -> Result<(SavingsTarget, String)> {
    match sub.get_one::<String>("goal") {
        Some(name) => Ok((
            SavingsTarget::Goal(goal_id_by_name(session, name)?),
            name.clone(),
        )),
        None => Ok((SavingsTarget::General, "general savings".to_string())),
    }
}

fn deposit(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let (target, label) = target_from_args(session, sub)?;
    let ccy = session.ledger.currency.clone();
    let receipt = session.deposit(&target, amount, date)?;
    println!("Deposited {} into {}", fmt_money(&amount, &ccy), label);
    if let Some(goal) = receipt.completed_goal {
        println!("🎉 Goal '{}' reached its target!", goal);
    }
    Ok(())
}

fn withdraw(session: &mut Session<impl Store>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let (target, label) = target_from_args(session, sub)?;
    let ccy = session.ledger.currency.clone();
    session.withdraw(&target, amount, date)?;
    println!("Withdrew {} from {}", fmt_money(&amount, &ccy), label);
    Ok(())
}
