// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::analysis;
use crate::models::{CategoryScope, StreamKind};
use crate::store::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, window_args};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("streams", sub)) => streams(ledger, sub)?,
        Some(("series", sub)) => series(ledger, sub)?,
        Some(("distribution", sub)) => distribution(ledger, sub)?,
        Some(("groups", sub)) => groups(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = window_args(sub)?;
    let totals = analysis::flow_totals(ledger.records(), &window);
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Net"],
                vec![vec![
                    fmt_money(&totals.income),
                    fmt_money(&totals.expense),
                    fmt_money(&totals.net),
                ]],
            )
        );
    }
    Ok(())
}

fn streams(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = window_args(sub)?;
    let kind = match sub.get_one::<String>("type").map(|s| s.as_str()) {
        Some("income") => StreamKind::Income,
        _ => StreamKind::Expense,
    };
    let slices = analysis::stream_breakdown(ledger.records(), ledger.streams(), kind, &window);
    if !maybe_print_json(json_flag, jsonl_flag, &slices)? {
        let rows = slices
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    fmt_money(&s.amount),
                    format!("{:.1}%", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Stream", "Amount", "Share"], rows));
    }
    Ok(())
}

fn series(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = window_args(sub)?;
    let points = analysis::flow_series(ledger.records(), &window);
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    fmt_money(&p.income),
                    fmt_money(&p.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Bucket", "Income", "Expense"], rows));
    }
    Ok(())
}

fn distribution(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let shares = analysis::account_distribution(ledger.accounts());
    if !maybe_print_json(json_flag, jsonl_flag, &shares)? {
        let rows = shares
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    fmt_money(&s.balance),
                    format!("{:.1}%", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Account", "Balance", "Share"], rows));
    }
    Ok(())
}

fn groups(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let groups = match sub.get_one::<String>("scope").map(|s| s.as_str()) {
        Some("stream") => analysis::group_by_category(
            ledger.categories(),
            CategoryScope::Stream,
            ledger
                .streams()
                .iter()
                .filter(|s| !s.is_system)
                .map(|s| (s.name.as_str(), s.category_id.as_deref())),
        ),
        _ => analysis::group_by_category(
            ledger.categories(),
            CategoryScope::Account,
            ledger.accounts().iter().map(|a| {
                let cid = if a.category_id.is_empty() {
                    None
                } else {
                    Some(a.category_id.as_str())
                };
                (a.name.as_str(), cid)
            }),
        ),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &groups)? {
        let rows = groups
            .iter()
            .map(|g| vec![g.name.clone(), g.members.join(", ")])
            .collect();
        println!("{}", pretty_table(&["Category", "Members"], rows));
    }
    Ok(())
}
