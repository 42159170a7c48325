// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::analysis;
use crate::commands::budgets::parse_period;
use crate::models::{Period, SavingsDraft};
use crate::store::Ledger;
use crate::utils::{
    account_label, fmt_money, id_for_account, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("status", sub)) => status(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_savings(id)?;
            println!("Removed savings goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = id_for_account(ledger, sub.get_one::<String>("account").unwrap())?;
    let target = parse_amount(sub.get_one::<String>("target").unwrap());
    let current = sub
        .get_one::<String>("current")
        .map(|s| parse_amount(s))
        .unwrap_or(Decimal::ZERO);
    let period = sub
        .get_one::<String>("period")
        .map(|s| parse_period(s))
        .transpose()?
        .unwrap_or(Period::Yearly);
    let today = Utc::now().date_naive();
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };
    let end_date = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
    };
    let goal = ledger.add_savings(SavingsDraft {
        account_id,
        target,
        current,
        period,
        start_date,
        end_date,
    })?;
    println!(
        "Savings goal {} added: target {}",
        goal.id,
        fmt_money(&goal.target)
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &ledger.savings())? {
        return Ok(());
    }
    let rows = ledger
        .savings()
        .iter()
        .map(|g| {
            vec![
                g.id.clone(),
                account_label(ledger, Some(&g.account_id)),
                fmt_money(&g.target),
                fmt_money(&g.current),
                g.period.label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Account", "Target", "Current", "Period"], rows)
    );
    Ok(())
}

fn status(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut rows = Vec::new();
    for goal in ledger.savings() {
        let progress = analysis::savings_progress(goal);
        rows.push(vec![
            account_label(ledger, Some(&goal.account_id)),
            fmt_money(&goal.target),
            fmt_money(&goal.current),
            format!("{:.0}%", progress.percentage),
            fmt_money(&progress.remaining),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        println!(
            "{}",
            pretty_table(
                &["Account", "Target", "Current", "Progress", "Remaining"],
                rows,
            )
        );
    }
    Ok(())
}
