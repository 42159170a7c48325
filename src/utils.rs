// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::filters::{DateRange, TimeFilter, Window};
use crate::store::Ledger;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Current-time-derived entity id: epoch milliseconds as a decimal string,
/// forced strictly increasing so same-millisecond adds never collide.
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(last.max(now - 1) + 1)
        })
        .unwrap_or(now - 1);
    (prev.max(now - 1) + 1).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Lenient amount parsing: non-numeric input becomes zero, never an error.
pub fn parse_amount(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(date);
    (first, last)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn parse_filter(s: &str) -> Result<TimeFilter> {
    match s.to_lowercase().as_str() {
        "day" => Ok(TimeFilter::Day),
        "week" => Ok(TimeFilter::Week),
        "month" => Ok(TimeFilter::Month),
        "quarter" => Ok(TimeFilter::Quarter),
        "year" => Ok(TimeFilter::Year),
        "custom" => Ok(TimeFilter::Custom),
        other => Err(anyhow!(
            "Unknown filter '{}' (use day|week|month|quarter|year|custom)",
            other
        )),
    }
}

/// Build the aggregation window from the shared `--filter/--date/--start/--end`
/// args. A complete start/end pair switches to the custom filter.
pub fn window_args(m: &clap::ArgMatches) -> Result<Window> {
    let current = match m.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let custom = match (m.get_one::<String>("start"), m.get_one::<String>("end")) {
        (Some(s), Some(e)) => Some(DateRange {
            start: parse_date(s)?,
            end: parse_date(e)?,
        }),
        _ => None,
    };
    let filter = if custom.is_some() {
        TimeFilter::Custom
    } else {
        m.get_one::<String>("filter")
            .map(|s| parse_filter(s))
            .transpose()?
            .unwrap_or(TimeFilter::Month)
    };
    Ok(Window {
        filter,
        current,
        custom,
    })
}

pub fn id_for_account(ledger: &Ledger, name: &str) -> Result<String> {
    ledger
        .accounts()
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.id.clone())
        .ok_or_else(|| anyhow!("Account '{}' not found", name))
}

pub fn id_for_stream(ledger: &Ledger, name: &str) -> Result<String> {
    ledger
        .streams()
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("Stream '{}' not found", name))
}

pub fn id_for_category(ledger: &Ledger, name: &str) -> Result<String> {
    ledger
        .categories()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}

/// Tolerant dereference for display: a dangling account id renders as a
/// generic label instead of failing.
pub fn account_label(ledger: &Ledger, id: Option<&str>) -> String {
    match id {
        Some(id) => ledger
            .accounts()
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        None => String::new(),
    }
}

pub fn stream_label(ledger: &Ledger, id: &str) -> String {
    ledger
        .streams()
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn weekday_label(d: chrono::Weekday) -> &'static str {
    match d.num_days_from_sunday() {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        _ => "Sat",
    }
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}
