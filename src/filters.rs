// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Active period granularity used to scope records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

/// Inclusive calendar range backing the `Custom` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// A filter anchored at a reference date, plus the session custom range.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub filter: TimeFilter,
    pub current: NaiveDate,
    pub custom: Option<DateRange>,
}

impl Window {
    pub fn new(filter: TimeFilter, current: NaiveDate) -> Self {
        Window {
            filter,
            current,
            custom: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        in_window(date, self.filter, self.current, self.custom.as_ref())
    }
}

pub fn in_window(
    date: NaiveDate,
    filter: TimeFilter,
    current: NaiveDate,
    custom: Option<&DateRange>,
) -> bool {
    match filter {
        TimeFilter::Day => date == current,
        TimeFilter::Week => {
            let start = current - Duration::days(current.weekday().num_days_from_sunday() as i64);
            let end = start + Duration::days(6);
            date >= start && date <= end
        }
        TimeFilter::Month => date.year() == current.year() && date.month() == current.month(),
        TimeFilter::Quarter => {
            date.year() == current.year() && date.month0() / 3 == current.month0() / 3
        }
        TimeFilter::Year => date.year() == current.year(),
        // Without a configured range the custom filter matches everything.
        TimeFilter::Custom => match custom {
            Some(r) => date >= r.start && date <= r.end,
            None => true,
        },
    }
}

/// Move the reference date one unit of the active filter. Month-based
/// arithmetic clamps to the last day of the target month (Jan 31 -> Feb 28).
pub fn shift(current: NaiveDate, filter: TimeFilter, dir: Direction) -> NaiveDate {
    let forward = dir == Direction::Next;
    match filter {
        TimeFilter::Day => current + Duration::days(if forward { 1 } else { -1 }),
        TimeFilter::Week => current + Duration::days(if forward { 7 } else { -7 }),
        TimeFilter::Month => shift_months(current, 1, forward),
        TimeFilter::Quarter => shift_months(current, 3, forward),
        TimeFilter::Year => shift_months(current, 12, forward),
        TimeFilter::Custom => current,
    }
}

fn shift_months(current: NaiveDate, n: u32, forward: bool) -> NaiveDate {
    let shifted = if forward {
        current.checked_add_months(Months::new(n))
    } else {
        current.checked_sub_months(Months::new(n))
    };
    shifted.unwrap_or(current)
}
