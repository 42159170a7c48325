// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use pocketbook::analysis::{
    account_distribution, budget_consumption, flow_series, flow_totals, savings_progress,
    stream_breakdown,
};
use pocketbook::filters::{TimeFilter, Window};
use pocketbook::models::{
    Account, Budget, Icon, Period, Record, RecordKind, SavingsGoal, Stream, StreamKind,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, h, 0, 0).unwrap()
}

fn record(kind: RecordKind, amount: &str, stream: &str, date: NaiveDate) -> Record {
    Record {
        id: format!("rec-{}-{}", stream, date),
        kind,
        amount: dec(amount),
        from_account_id: None,
        to_account_id: None,
        stream_id: stream.to_string(),
        note: None,
        date,
        created_at: at(date.year(), date.month(), date.day(), 12),
    }
}

fn stream(id: &str, name: &str, kind: StreamKind) -> Stream {
    Stream {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        icon: Icon::Wallet,
        color: "#000000".to_string(),
        category_id: None,
        is_system: kind == StreamKind::System,
        created_at: at(2025, 1, 1, 0),
    }
}

fn account(id: &str, name: &str, balance: &str) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        balance: dec(balance),
        category_id: String::new(),
        icon: Icon::Wallet,
        color: "#000000".to_string(),
        is_savings: false,
        bank: None,
        created_at: at(2025, 1, 1, 0),
    }
}

fn month_window(y: i32, m: u32, day: u32) -> Window {
    Window::new(TimeFilter::Month, d(y, m, day))
}

#[test]
fn totals_split_income_and_expense() {
    let records = vec![
        record(RecordKind::Income, "2600", "salary", d(2025, 6, 2)),
        record(RecordKind::Expense, "30", "groceries", d(2025, 6, 5)),
        record(RecordKind::Expense, "12.50", "dining", d(2025, 6, 7)),
        // out of window
        record(RecordKind::Expense, "99", "groceries", d(2025, 5, 30)),
    ];
    let totals = flow_totals(&records, &month_window(2025, 6, 15));
    assert_eq!(totals.income, dec("2600"));
    assert_eq!(totals.expense, dec("42.50"));
    assert_eq!(totals.net, dec("2557.50"));
}

#[test]
fn transfers_count_toward_neither_side() {
    let records = vec![
        record(RecordKind::Transfer, "50", "unaccounted", d(2025, 6, 5)),
        record(RecordKind::Alter, "10", "unaccounted", d(2025, 6, 6)),
    ];
    let totals = flow_totals(&records, &month_window(2025, 6, 15));
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expense, Decimal::ZERO);
    assert_eq!(totals.net, Decimal::ZERO);
}

#[test]
fn single_stream_breakdown_is_whole_total() {
    let streams = vec![stream("groceries", "Groceries", StreamKind::Expense)];
    let records = vec![record(RecordKind::Expense, "30", "groceries", d(2025, 6, 5))];
    let slices = stream_breakdown(
        &records,
        &streams,
        StreamKind::Expense,
        &month_window(2025, 6, 15),
    );
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].name, "Groceries");
    assert_eq!(slices[0].amount, dec("30"));
    assert_eq!(slices[0].percentage, dec("100"));
}

#[test]
fn breakdown_sums_to_total_and_sorts_descending() {
    let streams = vec![
        stream("groceries", "Groceries", StreamKind::Expense),
        stream("dining", "Dining", StreamKind::Expense),
        stream("rent", "Rent", StreamKind::Expense),
        stream("unaccounted", "Unaccounted", StreamKind::System),
    ];
    let records = vec![
        record(RecordKind::Expense, "40", "groceries", d(2025, 6, 3)),
        record(RecordKind::Expense, "20", "groceries", d(2025, 6, 9)),
        record(RecordKind::Expense, "90", "dining", d(2025, 6, 4)),
        record(RecordKind::Transfer, "500", "unaccounted", d(2025, 6, 5)),
    ];
    let window = month_window(2025, 6, 15);
    let slices = stream_breakdown(&records, &streams, StreamKind::Expense, &window);
    // rent dropped at zero, system stream never listed
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Dining");
    assert_eq!(slices[1].name, "Groceries");
    let total: Decimal = slices.iter().map(|s| s.amount).sum();
    assert_eq!(total, flow_totals(&records, &window).expense);
}

#[test]
fn budget_consumption_scenario() {
    let streams = vec![stream("groceries", "Groceries", StreamKind::Expense)];
    let budget = Budget {
        id: "b1".to_string(),
        stream_id: Some("groceries".to_string()),
        category_id: None,
        limit: dec("500"),
        spent: Decimal::ZERO,
        period: Period::Monthly,
        start_date: d(2025, 6, 1),
        end_date: d(2025, 6, 30),
        created_at: at(2025, 6, 1, 0),
    };
    let records = vec![
        record(RecordKind::Expense, "100", "groceries", d(2025, 6, 2)),
        record(RecordKind::Expense, "150", "groceries", d(2025, 6, 10)),
        record(RecordKind::Expense, "50", "groceries", d(2025, 6, 20)),
    ];
    let status = budget_consumption(&budget, &records, &streams, &month_window(2025, 6, 15));
    assert_eq!(status.spent, dec("300"));
    assert_eq!(status.percentage, dec("60"));
    assert_eq!(status.remaining, dec("200"));
    assert!(!status.over_budget);
}

#[test]
fn budget_percentage_is_uncapped() {
    let streams = vec![stream("dining", "Dining", StreamKind::Expense)];
    let budget = Budget {
        id: "b2".to_string(),
        stream_id: Some("dining".to_string()),
        category_id: None,
        limit: dec("100"),
        spent: Decimal::ZERO,
        period: Period::Monthly,
        start_date: d(2025, 6, 1),
        end_date: d(2025, 6, 30),
        created_at: at(2025, 6, 1, 0),
    };
    let records = vec![record(RecordKind::Expense, "120", "dining", d(2025, 6, 5))];
    let status = budget_consumption(&budget, &records, &streams, &month_window(2025, 6, 15));
    assert_eq!(status.percentage, dec("120"));
    assert_eq!(status.remaining, dec("-20"));
    assert!(status.over_budget);
}

#[test]
fn budget_with_zero_limit_degrades_to_zero_percent() {
    let streams = vec![stream("dining", "Dining", StreamKind::Expense)];
    let budget = Budget {
        id: "b3".to_string(),
        stream_id: Some("dining".to_string()),
        category_id: None,
        limit: Decimal::ZERO,
        spent: Decimal::ZERO,
        period: Period::Monthly,
        start_date: d(2025, 6, 1),
        end_date: d(2025, 6, 30),
        created_at: at(2025, 6, 1, 0),
    };
    let records = vec![record(RecordKind::Expense, "10", "dining", d(2025, 6, 5))];
    let status = budget_consumption(&budget, &records, &streams, &month_window(2025, 6, 15));
    assert_eq!(status.percentage, Decimal::ZERO);
}

#[test]
fn category_scoped_budget_matches_member_streams() {
    let mut groceries = stream("groceries", "Groceries", StreamKind::Expense);
    groceries.category_id = Some("cat-essentials".to_string());
    let dining = stream("dining", "Dining", StreamKind::Expense);
    let streams = vec![groceries, dining];
    let budget = Budget {
        id: "b4".to_string(),
        stream_id: None,
        category_id: Some("cat-essentials".to_string()),
        limit: dec("200"),
        spent: Decimal::ZERO,
        period: Period::Monthly,
        start_date: d(2025, 6, 1),
        end_date: d(2025, 6, 30),
        created_at: at(2025, 6, 1, 0),
    };
    let records = vec![
        record(RecordKind::Expense, "80", "groceries", d(2025, 6, 2)),
        record(RecordKind::Expense, "60", "dining", d(2025, 6, 3)),
    ];
    let status = budget_consumption(&budget, &records, &streams, &month_window(2025, 6, 15));
    assert_eq!(status.spent, dec("80"));
}

#[test]
fn savings_progress_caps_and_floors() {
    let goal = |current: &str, target: &str| SavingsGoal {
        id: "g".to_string(),
        account_id: "a".to_string(),
        target: dec(target),
        current: dec(current),
        period: Period::Yearly,
        start_date: d(2025, 1, 1),
        end_date: d(2025, 12, 31),
        created_at: at(2025, 1, 1, 0),
    };
    let p = savings_progress(&goal("250", "1000"));
    assert_eq!(p.percentage, dec("25"));
    assert_eq!(p.remaining, dec("750"));

    let p = savings_progress(&goal("1200", "1000"));
    assert_eq!(p.percentage, dec("100"));
    assert_eq!(p.remaining, Decimal::ZERO);

    let p = savings_progress(&goal("10", "0"));
    assert_eq!(p.percentage, Decimal::ZERO);
}

#[test]
fn month_series_buckets_by_day_in_order() {
    let records = vec![
        record(RecordKind::Expense, "5", "dining", d(2025, 6, 9)),
        record(RecordKind::Expense, "7", "dining", d(2025, 6, 2)),
        record(RecordKind::Income, "100", "salary", d(2025, 6, 2)),
        record(RecordKind::Expense, "3", "groceries", d(2025, 6, 2)),
    ];
    let points = flow_series(&records, &month_window(2025, 6, 15));
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].label, "2");
    assert_eq!(points[0].income, dec("100"));
    assert_eq!(points[0].expense, dec("10"));
    assert_eq!(points[1].label, "9");
    assert_eq!(points[1].expense, dec("5"));
}

#[test]
fn year_series_buckets_by_month_with_cap() {
    let mut records = Vec::new();
    for m in 1..=12 {
        records.push(record(RecordKind::Expense, "1", "dining", d(2025, m, 10)));
    }
    let window = Window::new(TimeFilter::Year, d(2025, 6, 15));
    let points = flow_series(&records, &window);
    assert_eq!(points.len(), 12);
    assert_eq!(points[0].label, "Jan");
    assert_eq!(points[11].label, "Dec");
}

#[test]
fn account_distribution_shares() {
    let accounts = vec![account("a", "A", "75"), account("b", "B", "25")];
    let shares = account_distribution(&accounts);
    assert_eq!(shares[0].percentage, dec("75"));
    assert_eq!(shares[1].percentage, dec("25"));

    let empty = vec![account("a", "A", "0"), account("b", "B", "0")];
    let shares = account_distribution(&empty);
    assert!(shares.iter().all(|s| s.percentage == Decimal::ZERO));
}
