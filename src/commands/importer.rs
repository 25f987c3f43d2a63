// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Snapshot;
use crate::session::Session;
use crate::storage::Store;
use anyhow::{Context, Result};

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("file").unwrap();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read snapshot {}", path))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).with_context(|| format!("Parse snapshot {}", path))?;

    let mut session = Session::open(store)?;
    session.restore(&snapshot)?;
    println!(
        "Restored {} transactions, {} goals into profile '{}'",
        snapshot.transactions.len(),
        snapshot.goals.len(),
        session.profile.name
    );
    Ok(())
}
