// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{Icon, StreamDraft, StreamKind};
use crate::store::Ledger;
use crate::utils::{id_for_category, id_for_stream, maybe_print_json, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_stream(ledger, name)?;
            ledger.delete_stream(&id)?;
            println!("Removed stream '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<StreamKind> {
    match s.to_lowercase().as_str() {
        "income" => Ok(StreamKind::Income),
        "expense" => Ok(StreamKind::Expense),
        other => Err(anyhow!("Unknown stream type '{}' (use income|expense)", other)),
    }
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let category_id = match sub.get_one::<String>("category") {
        Some(cat) => Some(id_for_category(ledger, cat)?),
        None => None,
    };
    let stream = ledger.add_stream(StreamDraft {
        name: name.clone(),
        kind,
        icon: sub
            .get_one::<String>("icon")
            .map(|s| Icon::from_name(s))
            .unwrap_or_default(),
        color: sub
            .get_one::<String>("color")
            .cloned()
            .unwrap_or_else(|| "#78909c".to_string()),
        category_id,
    })?;
    println!("Added {} stream '{}'", stream.kind.label(), stream.name);
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &ledger.streams())? {
        return Ok(());
    }
    let rows = ledger
        .streams()
        .iter()
        .map(|s| {
            let category = s
                .category_id
                .as_deref()
                .map(|cid| {
                    ledger
                        .categories()
                        .iter()
                        .find(|c| c.id == cid)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "Unknown".to_string())
                })
                .unwrap_or_default();
            vec![
                s.name.clone(),
                s.kind.label().to_string(),
                category,
                if s.is_system { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Type", "Category", "System"], rows)
    );
    Ok(())
}
