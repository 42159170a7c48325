// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::Ledger;
use crate::utils::pretty_table;

/// Dangling references are tolerated everywhere at runtime; this sweep just
/// makes them visible.
pub fn handle(ledger: &Ledger) -> Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    let account_exists = |id: &str| ledger.accounts().iter().any(|a| a.id == id);
    let stream_exists = |id: &str| ledger.streams().iter().any(|s| s.id == id);
    let category_exists = |id: &str| ledger.categories().iter().any(|c| c.id == id);

    for r in ledger.records() {
        for id in [r.from_account_id.as_deref(), r.to_account_id.as_deref()]
            .into_iter()
            .flatten()
        {
            if !account_exists(id) {
                rows.push(vec![
                    "record_missing_account".into(),
                    format!("{} -> {}", r.id, id),
                ]);
            }
        }
        if !stream_exists(&r.stream_id) {
            rows.push(vec![
                "record_missing_stream".into(),
                format!("{} -> {}", r.id, r.stream_id),
            ]);
        }
    }

    for a in ledger.accounts() {
        if !a.category_id.is_empty() && !category_exists(&a.category_id) {
            rows.push(vec![
                "account_missing_category".into(),
                format!("{} -> {}", a.name, a.category_id),
            ]);
        }
    }

    for s in ledger.streams() {
        if let Some(cid) = &s.category_id {
            if !category_exists(cid) {
                rows.push(vec![
                    "stream_missing_category".into(),
                    format!("{} -> {}", s.name, cid),
                ]);
            }
        }
    }

    for b in ledger.budgets() {
        if let Some(sid) = &b.stream_id {
            if !stream_exists(sid) {
                rows.push(vec![
                    "budget_missing_stream".into(),
                    format!("{} -> {}", b.id, sid),
                ]);
            }
        }
        if let Some(cid) = &b.category_id {
            if !category_exists(cid) {
                rows.push(vec![
                    "budget_missing_category".into(),
                    format!("{} -> {}", b.id, cid),
                ]);
            }
        }
    }

    for g in ledger.savings() {
        if !account_exists(&g.account_id) {
            rows.push(vec![
                "savings_missing_account".into(),
                format!("{} -> {}", g.id, g.account_id),
            ]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
