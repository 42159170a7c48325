// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketbook::storage::SqliteStorage;
use pocketbook::store::Ledger;
use pocketbook::{cli, commands, storage};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut ledger = Ledger::open(SqliteStorage::open_default()?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", storage::data_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("stream", sub)) => commands::streams::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("record", sub)) => commands::records::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut ledger, sub)?,
        Some(("reset", sub)) => {
            if sub.get_flag("yes") {
                ledger.reset()?;
                println!("Store cleared; demo seed restored");
            } else {
                println!("Pass --yes to confirm the destructive reset");
            }
        }
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
