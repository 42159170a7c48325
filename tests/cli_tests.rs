// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use pocketbook::models::{RecordDraft, RecordKind};
use pocketbook::storage::{COLLECTION_KEYS, MemoryStorage, Storage};
use pocketbook::store::Ledger;
use pocketbook::{cli, commands::records};

fn empty_ledger() -> Ledger {
    let mut storage = MemoryStorage::new();
    for key in COLLECTION_KEYS {
        storage.set(key, "[]").unwrap();
    }
    Ledger::open(storage).unwrap()
}

fn setup() -> Ledger {
    let mut ledger = empty_ledger();
    for day in 1..=3 {
        ledger
            .add_record(RecordDraft {
                kind: RecordKind::Expense,
                amount: "10".parse::<Decimal>().unwrap(),
                from_account_id: Some("ghost".to_string()),
                to_account_id: None,
                stream_id: "stream-x".to_string(),
                note: None,
                date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            })
            .unwrap();
    }
    ledger
}

#[test]
fn list_limit_respected() {
    let ledger = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketbook",
        "record",
        "list",
        "--start",
        "2025-01-01",
        "--end",
        "2025-12-31",
        "--limit",
        "2",
    ]);
    if let Some(("record", rec_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = rec_m.subcommand() {
            let rows = records::query_rows(&ledger, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no record subcommand");
    }
}

#[test]
fn list_window_excludes_out_of_range_records() {
    let ledger = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketbook",
        "record",
        "list",
        "--filter",
        "month",
        "--date",
        "2025-02-15",
    ]);
    if let Some(("record", rec_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = rec_m.subcommand() {
            let rows = records::query_rows(&ledger, list_m).unwrap();
            assert!(rows.is_empty());
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no record subcommand");
    }
}

#[test]
fn session_custom_range_is_held_in_memory() {
    let mut ledger = setup();
    assert_eq!(ledger.custom_range(), None);
    let range = pocketbook::filters::DateRange {
        start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    };
    ledger.set_custom_range(Some(range));
    assert_eq!(ledger.custom_range(), Some(range));
    ledger.set_custom_range(None);
    assert_eq!(ledger.custom_range(), None);
}
