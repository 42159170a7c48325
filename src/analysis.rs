// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivations over a store snapshot plus a time window. Nothing here
//! mutates state; every function is deterministic for a given snapshot and
//! window and is safe to recompute on every render.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::filters::{TimeFilter, Window};
use crate::models::{
    Account, Budget, Category, CategoryScope, Icon, Record, RecordKind, SavingsGoal, Stream,
    StreamKind,
};
use crate::utils::{month_label, weekday_label};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Income/expense/net over the window. Transfers and alters count toward
/// neither side.
pub fn flow_totals(records: &[Record], window: &Window) -> FlowTotals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for r in records.iter().filter(|r| window.contains(r.date)) {
        match r.kind {
            RecordKind::Income => income += r.amount,
            RecordKind::Expense => expense += r.amount,
            RecordKind::Transfer | RecordKind::Alter => {}
        }
    }
    FlowTotals {
        income,
        expense,
        net: income - expense,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamSlice {
    pub stream_id: String,
    pub name: String,
    pub icon: Icon,
    pub color: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Per-stream totals for one side of the ledger, zero entries dropped,
/// sorted descending. Percentages are shares of the included total.
pub fn stream_breakdown(
    records: &[Record],
    streams: &[Stream],
    kind: StreamKind,
    window: &Window,
) -> Vec<StreamSlice> {
    let mut slices = Vec::new();
    for stream in streams.iter().filter(|s| !s.is_system && s.kind == kind) {
        let amount: Decimal = records
            .iter()
            .filter(|r| window.contains(r.date) && r.stream_id == stream.id)
            .map(|r| r.amount)
            .sum();
        if amount.is_zero() {
            continue;
        }
        slices.push(StreamSlice {
            stream_id: stream.id.clone(),
            name: stream.name.clone(),
            icon: stream.icon,
            color: stream.color.clone(),
            amount,
            percentage: Decimal::ZERO,
        });
    }
    slices.sort_by(|a, b| b.amount.cmp(&a.amount));
    let total: Decimal = slices.iter().map(|s| s.amount).sum();
    if !total.is_zero() {
        for s in &mut slices {
            s.percentage = s.amount / total * Decimal::ONE_HUNDRED;
        }
    }
    slices
}

/// True when `record` counts against `budget`: a direct stream link wins,
/// else a category-scoped budget matches records whose stream belongs to
/// that category.
fn budget_matches(budget: &Budget, record: &Record, streams: &[Stream]) -> bool {
    if let Some(sid) = &budget.stream_id {
        return record.stream_id == *sid;
    }
    if let Some(cid) = &budget.category_id {
        return streams
            .iter()
            .find(|s| s.id == record.stream_id)
            .and_then(|s| s.category_id.as_deref())
            .is_some_and(|c| c == cid);
    }
    false
}

/// Sum of expense amounts in `records` that count against `budget`. Callers
/// pre-filter `records` to the window they care about.
pub fn budget_spent<'a, I>(budget: &Budget, records: I, streams: &[Stream]) -> Decimal
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| r.kind == RecordKind::Expense && budget_matches(budget, r, streams))
        .map(|r| r.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub spent: Decimal,
    /// Uncapped share of the limit; values over 100 signal overage.
    pub percentage: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

/// Presentation-time consumption, recomputed from the caller's window and
/// independent of the stored `spent` cache.
pub fn budget_consumption(
    budget: &Budget,
    records: &[Record],
    streams: &[Stream],
    window: &Window,
) -> BudgetStatus {
    let spent = budget_spent(
        budget,
        records.iter().filter(|r| window.contains(r.date)),
        streams,
    );
    let percentage = if budget.limit.is_zero() {
        Decimal::ZERO
    } else {
        spent / budget.limit * Decimal::ONE_HUNDRED
    };
    BudgetStatus {
        spent,
        percentage,
        remaining: budget.limit - spent,
        over_budget: spent > budget.limit,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsStatus {
    /// Capped at 100; a zero target degrades to 0.
    pub percentage: Decimal,
    pub remaining: Decimal,
}

pub fn savings_progress(goal: &SavingsGoal) -> SavingsStatus {
    let percentage = if goal.target <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (goal.current / goal.target * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    };
    SavingsStatus {
        percentage,
        remaining: (goal.target - goal.current).max(Decimal::ZERO),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

fn bucket_cap(filter: TimeFilter) -> usize {
    match filter {
        TimeFilter::Day => 24,
        TimeFilter::Week => 7,
        TimeFilter::Month => 31,
        TimeFilter::Quarter => 12,
        TimeFilter::Year => 12,
        TimeFilter::Custom => 31,
    }
}

fn bucket_key(r: &Record, filter: TimeFilter) -> ((u32, u32), String) {
    match filter {
        // Record dates carry no time of day; the creation timestamp supplies
        // the hour for day-granularity buckets.
        TimeFilter::Day => {
            let h = r.created_at.hour();
            ((0, h), format!("{:02}:00", h))
        }
        TimeFilter::Week => {
            let w = r.date.weekday();
            ((0, w.num_days_from_sunday()), weekday_label(w).to_string())
        }
        TimeFilter::Month => ((0, r.date.day()), r.date.day().to_string()),
        TimeFilter::Quarter => {
            let wk = (r.date.day() - 1) / 7 + 1;
            (
                (r.date.month(), wk),
                format!("{} W{}", month_label(r.date.month()), wk),
            )
        }
        TimeFilter::Year => (
            (0, r.date.month()),
            month_label(r.date.month()).to_string(),
        ),
        TimeFilter::Custom => (
            (r.date.year() as u32, r.date.ordinal()),
            format!("{} {}", month_label(r.date.month()), r.date.day()),
        ),
    }
}

/// Bucketed income/expense series at the filter's granularity, ordered by
/// the earliest record seen per bucket, capped to the most recent buckets.
pub fn flow_series(records: &[Record], window: &Window) -> Vec<FlowPoint> {
    struct Acc {
        first_seen: (NaiveDate, DateTime<Utc>),
        label: String,
        income: Decimal,
        expense: Decimal,
    }

    let mut buckets: HashMap<(u32, u32), Acc> = HashMap::new();
    for r in records.iter().filter(|r| window.contains(r.date)) {
        let (key, label) = bucket_key(r, window.filter);
        let acc = buckets.entry(key).or_insert_with(|| Acc {
            first_seen: (r.date, r.created_at),
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });
        if (r.date, r.created_at) < acc.first_seen {
            acc.first_seen = (r.date, r.created_at);
        }
        match r.kind {
            RecordKind::Income => acc.income += r.amount,
            RecordKind::Expense => acc.expense += r.amount,
            RecordKind::Transfer | RecordKind::Alter => {}
        }
    }

    let mut points: Vec<Acc> = buckets.into_values().collect();
    points.sort_by_key(|a| a.first_seen);
    let cap = bucket_cap(window.filter);
    if points.len() > cap {
        points.drain(..points.len() - cap);
    }
    points
        .into_iter()
        .map(|a| FlowPoint {
            label: a.label,
            income: a.income,
            expense: a.expense,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountShare {
    pub account_id: String,
    pub name: String,
    pub balance: Decimal,
    pub percentage: Decimal,
}

/// Share of each account's balance in the total across `accounts`. A zero
/// total degrades to all-zero percentages.
pub fn account_distribution(accounts: &[Account]) -> Vec<AccountShare> {
    let total: Decimal = accounts.iter().map(|a| a.balance).sum();
    accounts
        .iter()
        .map(|a| AccountShare {
            account_id: a.id.clone(),
            name: a.name.clone(),
            balance: a.balance,
            percentage: if total.is_zero() {
                Decimal::ZERO
            } else {
                a.balance / total * Decimal::ONE_HUNDRED
            },
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    /// `None` marks the fallback group for dangling or missing references.
    pub category_id: Option<String>,
    pub name: String,
    pub members: Vec<String>,
}

/// Partition display names by category within one scope. Members whose
/// category reference is absent or dangling land in an "Uncategorized"
/// group appended last; defined-but-empty categories are kept.
pub fn group_by_category<'a, I>(
    categories: &[Category],
    scope: CategoryScope,
    items: I,
) -> Vec<CategoryGroup>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let scoped: Vec<&Category> = categories.iter().filter(|c| c.scope == scope).collect();
    let mut groups: Vec<CategoryGroup> = scoped
        .iter()
        .map(|c| CategoryGroup {
            category_id: Some(c.id.clone()),
            name: c.name.clone(),
            members: Vec::new(),
        })
        .collect();
    let mut fallback = CategoryGroup {
        category_id: None,
        name: "Uncategorized".to_string(),
        members: Vec::new(),
    };
    for (name, category_id) in items {
        let slot = category_id.and_then(|cid| scoped.iter().position(|c| c.id == cid));
        match slot {
            Some(i) => groups[i].members.push(name.to_string()),
            None => fallback.members.push(name.to_string()),
        }
    }
    if !fallback.members.is_empty() {
        groups.push(fallback);
    }
    groups
}
