// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Utc;

use crate::analysis;
use crate::models::{BudgetDraft, Period};
use crate::store::Ledger;
use crate::utils::{
    fmt_money, id_for_category, id_for_stream, maybe_print_json, month_bounds, parse_amount,
    parse_date, pretty_table, stream_label, window_args,
};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("status", sub)) => status(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_budget(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn parse_period(s: &str) -> Result<Period> {
    match s.to_lowercase().as_str() {
        "daily" => Ok(Period::Daily),
        "weekly" => Ok(Period::Weekly),
        "monthly" => Ok(Period::Monthly),
        "quarterly" => Ok(Period::Quarterly),
        "yearly" => Ok(Period::Yearly),
        other => Err(anyhow!(
            "Unknown period '{}' (use daily|weekly|monthly|quarterly|yearly)",
            other
        )),
    }
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let stream_id = match sub.get_one::<String>("stream") {
        Some(name) => Some(id_for_stream(ledger, name)?),
        None => None,
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(ledger, name)?),
        None => None,
    };
    if stream_id.is_none() && category_id.is_none() {
        return Err(anyhow!("a budget needs --stream or --category"));
    }
    let limit = parse_amount(sub.get_one::<String>("limit").unwrap());
    let period = sub
        .get_one::<String>("period")
        .map(|s| parse_period(s))
        .transpose()?
        .unwrap_or(Period::Monthly);
    let (month_start, month_end) = month_bounds(Utc::now().date_naive());
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => month_start,
    };
    let end_date = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => month_end,
    };
    let budget = ledger.add_budget(BudgetDraft {
        stream_id,
        category_id,
        limit,
        period,
        start_date,
        end_date,
    })?;
    println!(
        "Budget {} set: limit {} ({})",
        budget.id,
        fmt_money(&budget.limit),
        budget.period.label()
    );
    Ok(())
}

fn target_label(ledger: &Ledger, budget: &crate::models::Budget) -> String {
    if let Some(sid) = &budget.stream_id {
        return stream_label(ledger, sid);
    }
    if let Some(cid) = &budget.category_id {
        return ledger
            .categories()
            .iter()
            .find(|c| &c.id == cid)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
    }
    String::new()
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &ledger.budgets())? {
        return Ok(());
    }
    let rows = ledger
        .budgets()
        .iter()
        .map(|b| {
            vec![
                b.id.clone(),
                target_label(ledger, b),
                fmt_money(&b.limit),
                fmt_money(&b.spent),
                b.period.label().to_string(),
                b.start_date.to_string(),
                b.end_date.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Target", "Limit", "Spent", "Period", "Start", "End"],
            rows,
        )
    );
    Ok(())
}

fn status(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = window_args(sub)?;
    let mut rows = Vec::new();
    for budget in ledger.budgets() {
        let status =
            analysis::budget_consumption(budget, ledger.records(), ledger.streams(), &window);
        rows.push(vec![
            target_label(ledger, budget),
            fmt_money(&budget.limit),
            fmt_money(&status.spent),
            format!("{:.0}%", status.percentage),
            fmt_money(&status.remaining),
            if status.over_budget { "OVER" } else { "" }.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        println!(
            "{}",
            pretty_table(
                &["Target", "Limit", "Spent", "Used", "Remaining", ""],
                rows,
            )
        );
    }
    Ok(())
}
