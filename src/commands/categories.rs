// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::session::Session;
use crate::storage::Store;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let mut session = Session::open(store)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let ty = TransactionType::parse(sub.get_one::<String>("type").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap();
            if session.add_category(ty, name)? {
                println!("Added {} category '{}'", ty, name);
            } else {
                println!("{} category '{}' already exists", ty, name);
            }
        }
        Some(("list", sub)) => {
            let types: Vec<TransactionType> = match sub.get_one::<String>("type") {
                Some(t) => vec![TransactionType::parse(t)?],
                None => TransactionType::ALL.to_vec(),
            };
            let mut rows = Vec::new();
            for ty in types {
                for name in session.ledger.categories.list(ty) {
                    rows.push(vec![ty.to_string(), name.clone()]);
                }
            }
            println!("{}", pretty_table(&["Type", "Category"], rows));
        }
        Some(("rm", sub)) => {
            let ty = TransactionType::parse(sub.get_one::<String>("type").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap();
            if session.remove_category(ty, name)? {
                println!("Removed {} category '{}'", ty, name);
            } else {
                println!("No {} category '{}'", ty, name);
            }
        }
        _ => {}
    }
    Ok(())
}
