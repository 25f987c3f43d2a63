// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::storage::Store;
use anyhow::Result;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();
    let session = Session::open(store)?;

    match fmt.as_str() {
        "json" => {
            let snapshot = session.snapshot();
            std::fs::write(out, serde_json::to_string_pretty(&snapshot)?)?;
            println!(
                "Exported profile '{}' ({} transactions, {} goals) to {}",
                snapshot.profile.name,
                snapshot.transactions.len(),
                snapshot.goals.len(),
                out
            );
        }
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "category",
                "amount",
                "currency",
                "exclude_from_balance",
                "note",
            ])?;
            for t in &session.ledger.transactions {
                wtr.write_record([
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.currency.clone(),
                    t.exclude_from_balance.to_string(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
            println!(
                "Exported {} transactions to {}",
                session.ledger.transactions.len(),
                out
            );
        }
        _ => {
            eprintln!("Unknown format: {} (use json|csv)", fmt);
        }
    }
    Ok(())
}
