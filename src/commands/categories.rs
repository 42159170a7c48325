// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{CategoryDraft, CategoryScope, Icon};
use crate::store::Ledger;
use crate::utils::{id_for_category, maybe_print_json, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let scope = match sub.get_one::<String>("scope").map(|s| s.as_str()) {
                Some("stream") => CategoryScope::Stream,
                Some("account") | None => CategoryScope::Account,
                Some(other) => return Err(anyhow!("Unknown scope '{}' (use account|stream)", other)),
            };
            ledger.add_category(CategoryDraft {
                name: name.clone(),
                scope,
                icon: sub
                    .get_one::<String>("icon")
                    .map(|s| Icon::from_name(s))
                    .unwrap_or_default(),
                color: sub
                    .get_one::<String>("color")
                    .cloned()
                    .unwrap_or_else(|| "#607d8b".to_string()),
                custom_svg: None,
            })?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if maybe_print_json(json_flag, jsonl_flag, &ledger.categories())? {
                return Ok(());
            }
            let rows = ledger
                .categories()
                .iter()
                .map(|c| {
                    vec![
                        c.name.clone(),
                        match c.scope {
                            CategoryScope::Account => "account".to_string(),
                            CategoryScope::Stream => "stream".to_string(),
                        },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Scope"], rows));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_category(ledger, name)?;
            ledger.delete_category(&id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
