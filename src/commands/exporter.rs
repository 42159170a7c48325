// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use serde_json::json;
use std::path::Path;

use crate::store::Ledger;
use crate::utils::{account_label, fmt_money, stream_label};

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => backup(ledger, sub),
        Some(("records", sub)) => export_records(ledger, sub),
        _ => Ok(()),
    }
}

/// One JSON document holding the six raw stored strings, written under a
/// timestamped file name.
fn backup(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let dir = sub
        .get_one::<String>("dir")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let path = Path::new(dir).join(format!("pocketbook-backup-{}.json", stamp));

    let mut doc = serde_json::Map::new();
    for (key, raw) in ledger.raw_collections()? {
        doc.insert(key.to_string(), serde_json::Value::String(raw));
    }
    std::fs::write(
        &path,
        serde_json::to_string_pretty(&serde_json::Value::Object(doc))?,
    )?;
    println!("Wrote backup to {}", path.display());
    Ok(())
}

fn export_records(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut records: Vec<_> = ledger.records().iter().collect();
    records.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "amount", "stream", "from", "to", "note"])?;
            for r in &records {
                wtr.write_record([
                    r.date.to_string(),
                    r.kind.label().to_string(),
                    fmt_money(&r.amount),
                    stream_label(ledger, &r.stream_id),
                    account_label(ledger, r.from_account_id.as_deref()),
                    account_label(ledger, r.to_account_id.as_deref()),
                    r.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for r in &records {
                items.push(json!({
                    "date": r.date.to_string(),
                    "type": r.kind.label(),
                    "amount": fmt_money(&r.amount),
                    "stream": stream_label(ledger, &r.stream_id),
                    "from": account_label(ledger, r.from_account_id.as_deref()),
                    "to": account_label(ledger, r.to_account_id.as_deref()),
                    "note": r.note.clone().unwrap_or_default(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => {
            bail!("Unknown format: {} (use csv|json)", other);
        }
    }
    println!("Exported records to {}", out);
    Ok(())
}
