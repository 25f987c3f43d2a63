// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use hisab::storage::SqliteStore;
use hisab::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let store = SqliteStore::new(conn);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("profile", sub)) => commands::profiles::handle(store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(store, sub)?,
        Some(("category", sub)) => commands::categories::handle(store, sub)?,
        Some(("currency", sub)) => commands::currency::handle(store, sub)?,
        Some(("stats", sub)) => commands::stats::handle(store, sub)?,
        Some(("report", sub)) => commands::reports::handle(store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(store, sub)?,
        Some(("import", sub)) => commands::importer::handle(store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
