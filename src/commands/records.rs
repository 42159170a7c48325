// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Serialize;

use crate::models::{RecordDraft, RecordKind};
use crate::seed::UNACCOUNTED_STREAM_ID;
use crate::store::Ledger;
use crate::utils::{
    account_label, fmt_money, id_for_account, id_for_stream, maybe_print_json, parse_amount,
    parse_date, pretty_table, stream_label, window_args,
};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_record(id)?;
            println!("Removed record {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<RecordKind> {
    match s.to_lowercase().as_str() {
        "income" => Ok(RecordKind::Income),
        "expense" => Ok(RecordKind::Expense),
        "transfer" => Ok(RecordKind::Transfer),
        "alter" => Ok(RecordKind::Alter),
        other => Err(anyhow!(
            "Unknown record type '{}' (use income|expense|transfer|alter)",
            other
        )),
    }
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    // Required flag, lenient parse: garbage becomes a zero amount.
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap());

    let from_account_id = match sub.get_one::<String>("from") {
        Some(name) => Some(id_for_account(ledger, name)?),
        None => None,
    };
    let to_account_id = match sub.get_one::<String>("to") {
        Some(name) => Some(id_for_account(ledger, name)?),
        None => None,
    };
    // Same shape guards the record form enforces before submit.
    match kind {
        RecordKind::Income if to_account_id.is_none() => {
            return Err(anyhow!("income records require --to"));
        }
        RecordKind::Expense if from_account_id.is_none() => {
            return Err(anyhow!("expense records require --from"));
        }
        RecordKind::Transfer if from_account_id.is_none() || to_account_id.is_none() => {
            return Err(anyhow!("transfer records require --from and --to"));
        }
        _ => {}
    }

    let stream_id = match sub.get_one::<String>("stream") {
        Some(name) => id_for_stream(ledger, name)?,
        None => match kind {
            // Pure transfers and manual corrections fall to the sentinel.
            RecordKind::Transfer | RecordKind::Alter => ledger
                .unaccounted_stream_id()
                .unwrap_or(UNACCOUNTED_STREAM_ID)
                .to_string(),
            _ => return Err(anyhow!("--stream is required for income/expense records")),
        },
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let record = ledger.add_record(RecordDraft {
        kind,
        amount,
        from_account_id,
        to_account_id,
        stream_id,
        note: sub.get_one::<String>("note").cloned(),
        date,
    })?;
    println!(
        "Recorded {} {} on {}",
        record.kind.label(),
        fmt_money(&record.amount),
        record.date
    );
    Ok(())
}

#[derive(Serialize)]
pub struct RecordRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub stream: String,
    pub from: String,
    pub to: String,
    pub note: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<RecordRow>> {
    let window = window_args(sub)?;
    let mut records: Vec<_> = ledger
        .records()
        .iter()
        .filter(|r| window.contains(r.date))
        .collect();
    records.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        records.truncate(*limit);
    }
    Ok(records
        .into_iter()
        .map(|r| RecordRow {
            id: r.id.clone(),
            date: r.date.to_string(),
            kind: r.kind.label().to_string(),
            amount: fmt_money(&r.amount),
            stream: stream_label(ledger, &r.stream_id),
            from: account_label(ledger, r.from_account_id.as_deref()),
            to: account_label(ledger, r.to_account_id.as_deref()),
            note: r.note.clone().unwrap_or_default(),
        })
        .collect())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.stream.clone(),
                    r.from.clone(),
                    r.to.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Stream", "From", "To", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
