// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx;
use crate::session::Session;
use crate::storage::Store;
use crate::utils::{parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list(),
        Some(("set", sub)) => set(store, sub)?,
        Some(("convert", sub)) => convert_amount(sub)?,
        _ => {}
    }
    Ok(())
}

fn list() {
    let rows = fx::CURRENCIES
        .iter()
        .map(|c| {
            vec![
                c.code.to_string(),
                c.name.to_string(),
                c.symbol.to_string(),
                c.usd_rate().to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Code", "Name", "Symbol", "USD rate"], rows));
}

fn set(store: impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().to_uppercase();
    let mut session = Session::open(store)?;
    if code == session.ledger.currency {
        println!("Display currency already {}", code);
        return Ok(());
    }
    session.set_currency(&code)?;
    println!(
        "Display currency set to {}; {} goal(s) re-denominated",
        code,
        session.ledger.goals.len()
    );
    Ok(())
}

fn convert_amount(sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = sub.get_one::<String>("from").unwrap().to_uppercase();
    let to = sub.get_one::<String>("to").unwrap().to_uppercase();
    let res = fx::convert(amount, &from, &to)?;
    println!("{} {} -> {:.4} {}", amount, from, res, to);
    Ok(())
}
