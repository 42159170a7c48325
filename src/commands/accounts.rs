// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{AccountDraft, AccountPatch, BankDetails, Icon};
use crate::store::Ledger;
use crate::utils::{fmt_money, id_for_account, id_for_category, maybe_print_json, parse_amount, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("update", sub)) => update(ledger, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_account(ledger, name)?;
            ledger.delete_account(&id)?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn bank_details(sub: &clap::ArgMatches) -> Option<BankDetails> {
    let bank_name = sub.get_one::<String>("bank-name");
    let account_number = sub.get_one::<String>("account-number");
    let routing_number = sub.get_one::<String>("routing-number");
    let card_type = sub.get_one::<String>("card-type");
    if bank_name.is_none() && account_number.is_none() && routing_number.is_none() && card_type.is_none() {
        return None;
    }
    Some(BankDetails {
        bank_name: bank_name.cloned().unwrap_or_default(),
        account_number: account_number.cloned().unwrap_or_default(),
        routing_number: routing_number.cloned().unwrap_or_default(),
        card_type: card_type.cloned().unwrap_or_default(),
    })
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    // Missing balance defaults to zero, same as a blank form field.
    let balance = sub
        .get_one::<String>("balance")
        .map(|s| parse_amount(s))
        .unwrap_or(Decimal::ZERO);
    let category_id = match sub.get_one::<String>("category") {
        Some(cat) => id_for_category(ledger, cat)?,
        None => String::new(),
    };
    let icon = sub
        .get_one::<String>("icon")
        .map(|s| Icon::from_name(s))
        .unwrap_or_default();
    let color = sub
        .get_one::<String>("color")
        .cloned()
        .unwrap_or_else(|| "#607d8b".to_string());
    let account = ledger.add_account(AccountDraft {
        name: name.clone(),
        balance,
        category_id,
        icon,
        color,
        is_savings: sub.get_flag("savings"),
        bank: bank_details(sub),
    })?;
    println!(
        "Added account '{}' with balance {}",
        account.name,
        fmt_money(&account.balance)
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &ledger.accounts())? {
        return Ok(());
    }
    let rows = ledger
        .accounts()
        .iter()
        .map(|a| {
            let category = ledger
                .categories()
                .iter()
                .find(|c| c.id == a.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            vec![
                a.name.clone(),
                fmt_money(&a.balance),
                category,
                if a.is_savings { "yes" } else { "" }.to_string(),
                a.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Balance", "Category", "Savings", "Created"], rows)
    );
    Ok(())
}

fn update(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = id_for_account(ledger, name)?;
    let category_id = match sub.get_one::<String>("category") {
        Some(cat) => Some(id_for_category(ledger, cat)?),
        None => None,
    };
    ledger.update_account(
        &id,
        AccountPatch {
            name: sub.get_one::<String>("rename").cloned(),
            balance: sub.get_one::<String>("balance").map(|s| parse_amount(s)),
            category_id,
            icon: sub.get_one::<String>("icon").map(|s| Icon::from_name(s)),
            color: sub.get_one::<String>("color").cloned(),
            ..Default::default()
        },
    )?;
    println!("Updated account '{}'", name);
    Ok(())
}
