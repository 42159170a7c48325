// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use pocketbook::filters::{DateRange, Direction, TimeFilter, in_window, shift};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn month_window_includes_both_ends() {
    let current = d(2025, 6, 15);
    assert!(in_window(d(2025, 6, 1), TimeFilter::Month, current, None));
    assert!(in_window(d(2025, 6, 30), TimeFilter::Month, current, None));
    assert!(!in_window(d(2025, 5, 31), TimeFilter::Month, current, None));
    assert!(!in_window(d(2025, 7, 1), TimeFilter::Month, current, None));
}

#[test]
fn day_window_is_exact() {
    let current = d(2025, 6, 15);
    assert!(in_window(current, TimeFilter::Day, current, None));
    assert!(!in_window(d(2025, 6, 14), TimeFilter::Day, current, None));
}

#[test]
fn week_window_starts_sunday() {
    // 2025-06-11 is a Wednesday; its week runs Sun 06-08 through Sat 06-14
    let current = d(2025, 6, 11);
    assert!(in_window(d(2025, 6, 8), TimeFilter::Week, current, None));
    assert!(in_window(d(2025, 6, 14), TimeFilter::Week, current, None));
    assert!(!in_window(d(2025, 6, 7), TimeFilter::Week, current, None));
    assert!(!in_window(d(2025, 6, 15), TimeFilter::Week, current, None));
}

#[test]
fn quarter_window_spans_three_months() {
    let current = d(2025, 5, 10);
    assert!(in_window(d(2025, 4, 1), TimeFilter::Quarter, current, None));
    assert!(in_window(d(2025, 6, 30), TimeFilter::Quarter, current, None));
    assert!(!in_window(d(2025, 3, 31), TimeFilter::Quarter, current, None));
    assert!(!in_window(d(2025, 7, 1), TimeFilter::Quarter, current, None));
}

#[test]
fn year_window() {
    let current = d(2025, 5, 10);
    assert!(in_window(d(2025, 1, 1), TimeFilter::Year, current, None));
    assert!(in_window(d(2025, 12, 31), TimeFilter::Year, current, None));
    assert!(!in_window(d(2024, 12, 31), TimeFilter::Year, current, None));
}

#[test]
fn custom_window_is_inclusive_and_fails_open() {
    let current = d(2025, 6, 15);
    let range = DateRange {
        start: d(2025, 6, 1),
        end: d(2025, 6, 10),
    };
    assert!(in_window(d(2025, 6, 1), TimeFilter::Custom, current, Some(&range)));
    assert!(in_window(d(2025, 6, 10), TimeFilter::Custom, current, Some(&range)));
    assert!(!in_window(d(2025, 6, 11), TimeFilter::Custom, current, Some(&range)));
    // no configured range: match everything
    assert!(in_window(d(1999, 1, 1), TimeFilter::Custom, current, None));
}

#[test]
fn every_record_is_in_or_out() {
    let current = d(2025, 6, 15);
    for day in 1..=30 {
        let date = d(2025, 6, day);
        assert!(in_window(date, TimeFilter::Month, current, None));
    }
    for (y, m, day) in [(2025, 5, 31), (2025, 7, 1), (2024, 6, 15)] {
        assert!(!in_window(d(y, m, day), TimeFilter::Month, current, None));
    }
}

#[test]
fn navigation_round_trips_mid_month() {
    let start = d(2025, 6, 15);
    for filter in [
        TimeFilter::Day,
        TimeFilter::Week,
        TimeFilter::Month,
        TimeFilter::Quarter,
        TimeFilter::Year,
    ] {
        let there = shift(start, filter, Direction::Next);
        assert_ne!(there, start);
        assert_eq!(shift(there, filter, Direction::Prev), start);
    }
}

#[test]
fn navigation_unit_sizes() {
    let start = d(2025, 6, 15);
    assert_eq!(shift(start, TimeFilter::Day, Direction::Next), d(2025, 6, 16));
    assert_eq!(shift(start, TimeFilter::Week, Direction::Next), d(2025, 6, 22));
    assert_eq!(shift(start, TimeFilter::Month, Direction::Next), d(2025, 7, 15));
    assert_eq!(shift(start, TimeFilter::Quarter, Direction::Next), d(2025, 9, 15));
    assert_eq!(shift(start, TimeFilter::Year, Direction::Next), d(2026, 6, 15));
}

#[test]
fn month_navigation_clamps_to_month_end() {
    assert_eq!(
        shift(d(2025, 1, 31), TimeFilter::Month, Direction::Next),
        d(2025, 2, 28)
    );
    assert_eq!(
        shift(d(2024, 1, 31), TimeFilter::Month, Direction::Next),
        d(2024, 2, 29)
    );
    assert_eq!(
        shift(d(2024, 2, 29), TimeFilter::Year, Direction::Next),
        d(2025, 2, 28)
    );
}

#[test]
fn custom_filter_does_not_navigate() {
    let start = d(2025, 6, 15);
    assert_eq!(shift(start, TimeFilter::Custom, Direction::Next), start);
}
