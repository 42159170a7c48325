// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demo dataset used when a storage key has never been written. Ids are
//! fixed strings so a fresh store is predictable to poke at.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::analysis;
use crate::models::{
    Account, BankDetails, Budget, Category, CategoryScope, Icon, Period, Record, RecordKind,
    SavingsGoal, Stream, StreamKind,
};
use crate::utils::month_bounds;

/// Id of the built-in sentinel stream tagging transfers that should not
/// count as income or expense.
pub const UNACCOUNTED_STREAM_ID: &str = "stream-unaccounted";

fn dec(s: &str) -> Decimal {
    s.parse().unwrap_or(Decimal::ZERO)
}

fn days_ago(n: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(n)
}

pub fn categories() -> Vec<Category> {
    let now = Utc::now();
    let mk = |id: &str, name: &str, scope, icon| Category {
        id: id.to_string(),
        name: name.to_string(),
        scope,
        icon,
        color: "#607d8b".to_string(),
        custom_svg: None,
        created_at: now,
    };
    vec![
        mk("cat-everyday", "Everyday", CategoryScope::Account, Icon::Wallet),
        mk("cat-reserves", "Reserves", CategoryScope::Account, Icon::PiggyBank),
        mk("cat-essentials", "Essentials", CategoryScope::Stream, Icon::Cart),
        mk("cat-lifestyle", "Lifestyle", CategoryScope::Stream, Icon::Heart),
    ]
}

pub fn accounts() -> Vec<Account> {
    let now = Utc::now();
    vec![
        Account {
            id: "acct-wallet".to_string(),
            name: "Wallet".to_string(),
            balance: dec("240.00"),
            category_id: "cat-everyday".to_string(),
            icon: Icon::Wallet,
            color: "#ff9800".to_string(),
            is_savings: false,
            bank: None,
            created_at: now,
        },
        Account {
            id: "acct-checking".to_string(),
            name: "Checking".to_string(),
            balance: dec("1850.00"),
            category_id: "cat-everyday".to_string(),
            icon: Icon::Bank,
            color: "#3f51b5".to_string(),
            is_savings: false,
            bank: Some(BankDetails {
                bank_name: "First Demo Bank".to_string(),
                account_number: "000123456".to_string(),
                routing_number: "110000000".to_string(),
                card_type: "debit".to_string(),
            }),
            created_at: now,
        },
        Account {
            id: "acct-rainy-day".to_string(),
            name: "Rainy Day".to_string(),
            balance: dec("620.00"),
            category_id: "cat-reserves".to_string(),
            icon: Icon::PiggyBank,
            color: "#009688".to_string(),
            is_savings: true,
            bank: None,
            created_at: now,
        },
    ]
}

pub fn streams() -> Vec<Stream> {
    let now = Utc::now();
    let mk = |id: &str, name: &str, kind, icon, category_id: Option<&str>| Stream {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        icon,
        color: "#78909c".to_string(),
        category_id: category_id.map(|c| c.to_string()),
        is_system: false,
        created_at: now,
    };
    vec![
        mk("stream-salary", "Salary", StreamKind::Income, Icon::Briefcase, None),
        mk(
            "stream-groceries",
            "Groceries",
            StreamKind::Expense,
            Icon::Cart,
            Some("cat-essentials"),
        ),
        mk(
            "stream-rent",
            "Rent",
            StreamKind::Expense,
            Icon::House,
            Some("cat-essentials"),
        ),
        mk(
            "stream-dining",
            "Dining",
            StreamKind::Expense,
            Icon::Utensils,
            Some("cat-lifestyle"),
        ),
        Stream {
            id: UNACCOUNTED_STREAM_ID.to_string(),
            name: "Unaccounted".to_string(),
            kind: StreamKind::System,
            icon: Icon::Bolt,
            color: "#9e9e9e".to_string(),
            category_id: None,
            is_system: true,
            created_at: now,
        },
    ]
}

pub fn records() -> Vec<Record> {
    let now = Utc::now();
    let mk = |id: &str, kind, amount: &str, from: Option<&str>, to: Option<&str>, stream: &str, date| {
        Record {
            id: id.to_string(),
            kind,
            amount: dec(amount),
            from_account_id: from.map(|s| s.to_string()),
            to_account_id: to.map(|s| s.to_string()),
            stream_id: stream.to_string(),
            note: None,
            date,
            created_at: now,
        }
    };
    vec![
        mk(
            "rec-salary",
            RecordKind::Income,
            "2600.00",
            None,
            Some("acct-checking"),
            "stream-salary",
            days_ago(5),
        ),
        mk(
            "rec-transfer-savings",
            RecordKind::Transfer,
            "200.00",
            Some("acct-checking"),
            Some("acct-rainy-day"),
            UNACCOUNTED_STREAM_ID,
            days_ago(3),
        ),
        mk(
            "rec-groceries",
            RecordKind::Expense,
            "54.20",
            Some("acct-wallet"),
            None,
            "stream-groceries",
            days_ago(2),
        ),
        mk(
            "rec-dining",
            RecordKind::Expense,
            "18.75",
            Some("acct-wallet"),
            None,
            "stream-dining",
            days_ago(1),
        ),
    ]
}

pub fn budgets() -> Vec<Budget> {
    let (start, end) = month_bounds(Utc::now().date_naive());
    let mut budget = Budget {
        id: "budget-groceries".to_string(),
        stream_id: Some("stream-groceries".to_string()),
        category_id: None,
        limit: dec("400.00"),
        spent: Decimal::ZERO,
        period: Period::Monthly,
        start_date: start,
        end_date: end,
        created_at: Utc::now(),
    };
    let records = records();
    let streams = streams();
    budget.spent = analysis::budget_spent(
        &budget,
        records
            .iter()
            .filter(|r| r.date >= budget.start_date && r.date <= budget.end_date),
        &streams,
    );
    vec![budget]
}

pub fn savings() -> Vec<SavingsGoal> {
    let today = Utc::now().date_naive();
    let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
    vec![SavingsGoal {
        id: "savings-rainy-day".to_string(),
        account_id: "acct-rainy-day".to_string(),
        target: dec("5000.00"),
        current: dec("620.00"),
        period: Period::Yearly,
        start_date: start,
        end_date: end,
        created_at: Utc::now(),
    }]
}
