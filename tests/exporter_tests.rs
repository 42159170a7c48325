// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

use pocketbook::models::{AccountDraft, Icon, RecordDraft, RecordKind, StreamDraft, StreamKind};
use pocketbook::storage::{COLLECTION_KEYS, MemoryStorage, Storage};
use pocketbook::store::Ledger;
use pocketbook::{cli, commands::exporter};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn empty_ledger() -> Ledger {
    let mut storage = MemoryStorage::new();
    for key in COLLECTION_KEYS {
        storage.set(key, "[]").unwrap();
    }
    Ledger::open(storage).unwrap()
}

fn populated_ledger() -> Ledger {
    let mut ledger = empty_ledger();
    let account = ledger
        .add_account(AccountDraft {
            name: "Checking".to_string(),
            balance: dec("100"),
            category_id: String::new(),
            icon: Icon::Bank,
            color: "#000000".to_string(),
            is_savings: false,
            bank: None,
        })
        .unwrap();
    let stream = ledger
        .add_stream(StreamDraft {
            name: "Groceries".to_string(),
            kind: StreamKind::Expense,
            icon: Icon::Cart,
            color: "#000000".to_string(),
            category_id: None,
        })
        .unwrap();
    ledger
        .add_record(RecordDraft {
            kind: RecordKind::Expense,
            amount: dec("12.34"),
            from_account_id: Some(account.id),
            to_account_id: None,
            stream_id: stream.id,
            note: Some("Weekly run".to_string()),
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        })
        .unwrap();
    ledger
}

#[test]
fn backup_wraps_the_six_raw_collections() {
    let ledger = populated_ledger();
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["pocketbook", "export", "backup", "--dir", &dir_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&ledger, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let entry = std::fs::read_dir(dir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let name = entry.file_name().to_string_lossy().to_string();
    assert!(name.starts_with("pocketbook-backup-"));
    assert!(name.ends_with(".json"));
    // the timestamp suffix is date-derived
    assert!(name.contains(&Utc::now().format("%Y-").to_string()));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(entry.path()).unwrap()).unwrap();
    for key in COLLECTION_KEYS {
        let raw = doc.get(key).and_then(|v| v.as_str()).unwrap();
        // each value is itself a raw JSON array string
        assert!(serde_json::from_str::<serde_json::Value>(raw).unwrap().is_array());
    }
    let accounts: serde_json::Value =
        serde_json::from_str(doc["accounts"].as_str().unwrap()).unwrap();
    assert_eq!(accounts[0]["name"], "Checking");
}

#[test]
fn restore_round_trips_into_another_store() {
    let source = populated_ledger();
    let mut doc = serde_json::Map::new();
    for (key, raw) in source.raw_collections().unwrap() {
        doc.insert(key.to_string(), serde_json::Value::String(raw));
    }
    let doc = serde_json::to_string(&serde_json::Value::Object(doc)).unwrap();

    let mut target = Ledger::open(MemoryStorage::new()).unwrap();
    assert_ne!(target.accounts(), source.accounts());
    target.restore(&doc).unwrap();
    assert_eq!(target.accounts(), source.accounts());
    assert_eq!(target.records(), source.records());
    assert_eq!(target.streams(), source.streams());
}

#[test]
fn export_records_streams_pretty_json() {
    let ledger = populated_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketbook",
        "export",
        "records",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&ledger, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "type": "expense",
                "amount": "12.34",
                "stream": "Groceries",
                "from": "Checking",
                "to": "",
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_records_rejects_unknown_format() {
    let ledger = populated_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketbook",
        "export",
        "records",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&ledger, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
