// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical owner of the six collections. Every mutation persists the
//! touched collections before returning; presentation code only ever holds
//! transient copies. Not-found updates and deletes are silent no-ops, and a
//! record referencing a missing account simply skips that balance effect —
//! only storage failures surface as errors.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::analysis;
use crate::filters::DateRange;
use crate::models::{
    Account, AccountDraft, AccountPatch, Budget, BudgetDraft, BudgetPatch, Category,
    CategoryDraft, CategoryPatch, Record, RecordDraft, RecordKind, RecordPatch, SavingsDraft,
    SavingsGoal, SavingsPatch, Stream, StreamDraft, StreamPatch,
};
use crate::seed;
use crate::storage::{
    ACCOUNTS_KEY, BUDGETS_KEY, CATEGORIES_KEY, COLLECTION_KEYS, RECORDS_KEY, SAVINGS_KEY,
    STREAMS_KEY, Storage, StorageError,
};
use crate::utils::next_id;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("corrupt snapshot under '{key}': {source}")]
    Snapshot {
        key: &'static str,
        source: serde_json::Error,
    },
}

pub struct Ledger {
    storage: Box<dyn Storage>,
    accounts: Vec<Account>,
    streams: Vec<Stream>,
    categories: Vec<Category>,
    records: Vec<Record>,
    budgets: Vec<Budget>,
    savings: Vec<SavingsGoal>,
    /// Session-scoped range for the custom time filter; never persisted.
    custom_range: Option<DateRange>,
}

fn load_or_seed<T>(
    storage: &mut dyn Storage,
    key: &'static str,
    seed: fn() -> Vec<T>,
) -> Result<Vec<T>, StoreError>
where
    T: Serialize + DeserializeOwned,
{
    match storage.get(key)? {
        Some(raw) => {
            serde_json::from_str(&raw).map_err(|source| StoreError::Snapshot { key, source })
        }
        None => {
            let items = seed();
            let raw = serde_json::to_string(&items)
                .map_err(|source| StoreError::Snapshot { key, source })?;
            storage.set(key, &raw)?;
            Ok(items)
        }
    }
}

fn persist<T: Serialize>(
    storage: &mut dyn Storage,
    key: &'static str,
    items: &[T],
) -> Result<(), StoreError> {
    let raw =
        serde_json::to_string(items).map_err(|source| StoreError::Snapshot { key, source })?;
    storage.set(key, &raw)?;
    Ok(())
}

fn budget_covers_stream(budget: &Budget, stream_id: &str, streams: &[Stream]) -> bool {
    if let Some(sid) = &budget.stream_id {
        return sid == stream_id;
    }
    if let Some(cid) = &budget.category_id {
        return streams
            .iter()
            .find(|s| s.id == stream_id)
            .and_then(|s| s.category_id.as_deref())
            .is_some_and(|c| c == cid);
    }
    false
}

impl Ledger {
    /// Open against any storage backend, bootstrapping absent collections
    /// from the seed dataset.
    pub fn open<S: Storage + 'static>(storage: S) -> Result<Self, StoreError> {
        let mut ledger = Ledger {
            storage: Box::new(storage),
            accounts: Vec::new(),
            streams: Vec::new(),
            categories: Vec::new(),
            records: Vec::new(),
            budgets: Vec::new(),
            savings: Vec::new(),
            custom_range: None,
        };
        ledger.reload()?;
        Ok(ledger)
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.accounts = load_or_seed(self.storage.as_mut(), ACCOUNTS_KEY, seed::accounts)?;
        self.streams = load_or_seed(self.storage.as_mut(), STREAMS_KEY, seed::streams)?;
        self.categories = load_or_seed(self.storage.as_mut(), CATEGORIES_KEY, seed::categories)?;
        self.records = load_or_seed(self.storage.as_mut(), RECORDS_KEY, seed::records)?;
        self.budgets = load_or_seed(self.storage.as_mut(), BUDGETS_KEY, seed::budgets)?;
        self.savings = load_or_seed(self.storage.as_mut(), SAVINGS_KEY, seed::savings)?;
        Ok(())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn savings(&self) -> &[SavingsGoal] {
        &self.savings
    }

    pub fn custom_range(&self) -> Option<DateRange> {
        self.custom_range
    }

    pub fn set_custom_range(&mut self, range: Option<DateRange>) {
        self.custom_range = range;
    }

    pub fn unaccounted_stream_id(&self) -> Option<&str> {
        self.streams
            .iter()
            .find(|s| s.is_system)
            .map(|s| s.id.as_str())
    }

    // ---- accounts ----

    pub fn add_account(&mut self, draft: AccountDraft) -> Result<Account, StoreError> {
        let account = Account {
            id: next_id(),
            name: draft.name,
            balance: draft.balance,
            category_id: draft.category_id,
            icon: draft.icon,
            color: draft.color,
            is_savings: draft.is_savings,
            bank: draft.bank,
            created_at: Utc::now(),
        };
        self.accounts.push(account.clone());
        persist(self.storage.as_mut(), ACCOUNTS_KEY, &self.accounts)?;
        Ok(account)
    }

    pub fn update_account(&mut self, id: &str, patch: AccountPatch) -> Result<(), StoreError> {
        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(());
        };
        if let Some(v) = patch.name {
            account.name = v;
        }
        if let Some(v) = patch.balance {
            account.balance = v;
        }
        if let Some(v) = patch.category_id {
            account.category_id = v;
        }
        if let Some(v) = patch.icon {
            account.icon = v;
        }
        if let Some(v) = patch.color {
            account.color = v;
        }
        if let Some(v) = patch.is_savings {
            account.is_savings = v;
        }
        if let Some(v) = patch.bank {
            account.bank = Some(v);
        }
        persist(self.storage.as_mut(), ACCOUNTS_KEY, &self.accounts)
    }

    pub fn delete_account(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            return Ok(());
        }
        persist(self.storage.as_mut(), ACCOUNTS_KEY, &self.accounts)
    }

    // ---- streams ----

    pub fn add_stream(&mut self, draft: StreamDraft) -> Result<Stream, StoreError> {
        let stream = Stream {
            id: next_id(),
            name: draft.name,
            kind: draft.kind,
            icon: draft.icon,
            color: draft.color,
            category_id: draft.category_id,
            is_system: false,
            created_at: Utc::now(),
        };
        self.streams.push(stream.clone());
        persist(self.storage.as_mut(), STREAMS_KEY, &self.streams)?;
        Ok(stream)
    }

    pub fn update_stream(&mut self, id: &str, patch: StreamPatch) -> Result<(), StoreError> {
        let Some(stream) = self.streams.iter_mut().find(|s| s.id == id) else {
            return Ok(());
        };
        if let Some(v) = patch.name {
            stream.name = v;
        }
        if let Some(v) = patch.icon {
            stream.icon = v;
        }
        if let Some(v) = patch.color {
            stream.color = v;
        }
        if let Some(v) = patch.category_id {
            stream.category_id = Some(v);
        }
        persist(self.storage.as_mut(), STREAMS_KEY, &self.streams)
    }

    pub fn delete_stream(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.streams.len();
        self.streams.retain(|s| s.id != id);
        if self.streams.len() == before {
            return Ok(());
        }
        persist(self.storage.as_mut(), STREAMS_KEY, &self.streams)
    }

    // ---- categories ----

    pub fn add_category(&mut self, draft: CategoryDraft) -> Result<Category, StoreError> {
        let category = Category {
            id: next_id(),
            name: draft.name,
            scope: draft.scope,
            icon: draft.icon,
            color: draft.color,
            custom_svg: draft.custom_svg,
            created_at: Utc::now(),
        };
        self.categories.push(category.clone());
        persist(self.storage.as_mut(), CATEGORIES_KEY, &self.categories)?;
        Ok(category)
    }

    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> Result<(), StoreError> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(());
        };
        if let Some(v) = patch.name {
            category.name = v;
        }
        if let Some(v) = patch.icon {
            category.icon = v;
        }
        if let Some(v) = patch.color {
            category.color = v;
        }
        if let Some(v) = patch.custom_svg {
            category.custom_svg = Some(v);
        }
        persist(self.storage.as_mut(), CATEGORIES_KEY, &self.categories)
    }

    /// Deleting a category never cascades: accounts and streams keep their
    /// now-dangling reference and render under the fallback group.
    pub fn delete_category(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Ok(());
        }
        persist(self.storage.as_mut(), CATEGORIES_KEY, &self.categories)
    }

    // ---- records ----

    /// Append a record and apply its balance effect to the referenced
    /// accounts. Transfer effects are computed from both balances as read
    /// before either write.
    pub fn add_record(&mut self, draft: RecordDraft) -> Result<Record, StoreError> {
        let record = Record {
            id: next_id(),
            kind: draft.kind,
            amount: draft.amount,
            from_account_id: draft.from_account_id,
            to_account_id: draft.to_account_id,
            stream_id: draft.stream_id,
            note: draft.note,
            date: draft.date,
            created_at: Utc::now(),
        };
        let balances_touched = self.apply_balance_effects(&record);
        self.records.push(record.clone());
        let stream_id = record.stream_id.clone();
        let budgets_touched = self.refresh_budget_caches(&[stream_id.as_str()]);
        persist(self.storage.as_mut(), RECORDS_KEY, &self.records)?;
        if balances_touched {
            persist(self.storage.as_mut(), ACCOUNTS_KEY, &self.accounts)?;
        }
        if budgets_touched {
            persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)?;
        }
        Ok(record)
    }

    /// Editing a record never readjusts account balances; only the budget
    /// caches of the old and new streams are refreshed.
    pub fn update_record(&mut self, id: &str, patch: RecordPatch) -> Result<(), StoreError> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(());
        };
        let old_stream = record.stream_id.clone();
        if let Some(v) = patch.amount {
            record.amount = v;
        }
        if let Some(v) = patch.from_account_id {
            record.from_account_id = Some(v);
        }
        if let Some(v) = patch.to_account_id {
            record.to_account_id = Some(v);
        }
        if let Some(v) = patch.stream_id {
            record.stream_id = v;
        }
        if let Some(v) = patch.note {
            record.note = Some(v);
        }
        if let Some(v) = patch.date {
            record.date = v;
        }
        let new_stream = record.stream_id.clone();
        persist(self.storage.as_mut(), RECORDS_KEY, &self.records)?;
        let touched = self.refresh_budget_caches(&[old_stream.as_str(), new_stream.as_str()]);
        if touched {
            persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)?;
        }
        Ok(())
    }

    pub fn delete_record(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return Ok(());
        };
        let removed = self.records.remove(pos);
        persist(self.storage.as_mut(), RECORDS_KEY, &self.records)?;
        let touched = self.refresh_budget_caches(&[removed.stream_id.as_str()]);
        if touched {
            persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)?;
        }
        Ok(())
    }

    fn apply_balance_effects(&mut self, record: &Record) -> bool {
        match record.kind {
            RecordKind::Income => self.credit(record.to_account_id.as_deref(), record.amount),
            RecordKind::Expense => self.credit(record.from_account_id.as_deref(), -record.amount),
            RecordKind::Transfer => {
                let from_balance = self.balance_of(record.from_account_id.as_deref());
                let to_balance = self.balance_of(record.to_account_id.as_deref());
                let mut touched = false;
                if let (Some(id), Some(balance)) = (record.from_account_id.as_deref(), from_balance)
                {
                    touched |= self.set_balance(id, balance - record.amount);
                }
                if let (Some(id), Some(balance)) = (record.to_account_id.as_deref(), to_balance) {
                    touched |= self.set_balance(id, balance + record.amount);
                }
                touched
            }
            // Reserved for manual corrections; no automatic effect.
            RecordKind::Alter => false,
        }
    }

    fn balance_of(&self, id: Option<&str>) -> Option<Decimal> {
        id.and_then(|id| self.accounts.iter().find(|a| a.id == id))
            .map(|a| a.balance)
    }

    /// Missing account ids are skipped without error.
    fn credit(&mut self, id: Option<&str>, delta: Decimal) -> bool {
        let Some(id) = id else {
            return false;
        };
        match self.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.balance += delta;
                true
            }
            None => false,
        }
    }

    fn set_balance(&mut self, id: &str, balance: Decimal) -> bool {
        match self.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.balance = balance;
                true
            }
            None => false,
        }
    }

    fn refresh_budget_caches(&mut self, stream_ids: &[&str]) -> bool {
        let mut touched = false;
        for i in 0..self.budgets.len() {
            let affected = stream_ids
                .iter()
                .any(|sid| budget_covers_stream(&self.budgets[i], sid, &self.streams));
            if !affected {
                continue;
            }
            let spent = {
                let b = &self.budgets[i];
                analysis::budget_spent(
                    b,
                    self.records
                        .iter()
                        .filter(|r| r.date >= b.start_date && r.date <= b.end_date),
                    &self.streams,
                )
            };
            if self.budgets[i].spent != spent {
                self.budgets[i].spent = spent;
                touched = true;
            }
        }
        touched
    }

    // ---- budgets ----

    pub fn add_budget(&mut self, draft: BudgetDraft) -> Result<Budget, StoreError> {
        let mut budget = Budget {
            id: next_id(),
            stream_id: draft.stream_id,
            category_id: draft.category_id,
            limit: draft.limit,
            spent: Decimal::ZERO,
            period: draft.period,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: Utc::now(),
        };
        budget.spent = analysis::budget_spent(
            &budget,
            self.records
                .iter()
                .filter(|r| r.date >= budget.start_date && r.date <= budget.end_date),
            &self.streams,
        );
        self.budgets.push(budget.clone());
        persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)?;
        Ok(budget)
    }

    pub fn update_budget(&mut self, id: &str, patch: BudgetPatch) -> Result<(), StoreError> {
        let Some(pos) = self.budgets.iter().position(|b| b.id == id) else {
            return Ok(());
        };
        {
            let budget = &mut self.budgets[pos];
            if let Some(v) = patch.stream_id {
                budget.stream_id = Some(v);
            }
            if let Some(v) = patch.category_id {
                budget.category_id = Some(v);
            }
            if let Some(v) = patch.limit {
                budget.limit = v;
            }
            if let Some(v) = patch.period {
                budget.period = v;
            }
            if let Some(v) = patch.start_date {
                budget.start_date = v;
            }
            if let Some(v) = patch.end_date {
                budget.end_date = v;
            }
        }
        let spent = {
            let b = &self.budgets[pos];
            analysis::budget_spent(
                b,
                self.records
                    .iter()
                    .filter(|r| r.date >= b.start_date && r.date <= b.end_date),
                &self.streams,
            )
        };
        self.budgets[pos].spent = spent;
        persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        if self.budgets.len() == before {
            return Ok(());
        }
        persist(self.storage.as_mut(), BUDGETS_KEY, &self.budgets)
    }

    // ---- savings goals ----

    pub fn add_savings(&mut self, draft: SavingsDraft) -> Result<SavingsGoal, StoreError> {
        let goal = SavingsGoal {
            id: next_id(),
            account_id: draft.account_id,
            target: draft.target,
            current: draft.current,
            period: draft.period,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: Utc::now(),
        };
        self.savings.push(goal.clone());
        persist(self.storage.as_mut(), SAVINGS_KEY, &self.savings)?;
        Ok(goal)
    }

    pub fn update_savings(&mut self, id: &str, patch: SavingsPatch) -> Result<(), StoreError> {
        let Some(goal) = self.savings.iter_mut().find(|g| g.id == id) else {
            return Ok(());
        };
        if let Some(v) = patch.account_id {
            goal.account_id = v;
        }
        if let Some(v) = patch.target {
            goal.target = v;
        }
        if let Some(v) = patch.current {
            goal.current = v;
        }
        if let Some(v) = patch.period {
            goal.period = v;
        }
        if let Some(v) = patch.start_date {
            goal.start_date = v;
        }
        if let Some(v) = patch.end_date {
            goal.end_date = v;
        }
        persist(self.storage.as_mut(), SAVINGS_KEY, &self.savings)
    }

    pub fn delete_savings(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.savings.len();
        self.savings.retain(|g| g.id != id);
        if self.savings.len() == before {
            return Ok(());
        }
        persist(self.storage.as_mut(), SAVINGS_KEY, &self.savings)
    }

    // ---- backup / reset ----

    /// The six raw stored strings, keyed, for the backup document.
    pub fn raw_collections(&self) -> Result<Vec<(&'static str, String)>, StoreError> {
        let mut out = Vec::with_capacity(COLLECTION_KEYS.len());
        for key in COLLECTION_KEYS {
            let raw = self.storage.get(key)?.unwrap_or_else(|| "[]".to_string());
            out.push((key, raw));
        }
        Ok(out)
    }

    /// Write a backup document's raw strings back and reload. Keys absent
    /// from the document are left untouched.
    pub fn restore(&mut self, doc: &str) -> Result<(), StoreError> {
        let value: serde_json::Value = serde_json::from_str(doc)
            .map_err(|source| StoreError::Snapshot { key: "backup", source })?;
        for key in COLLECTION_KEYS {
            if let Some(raw) = value.get(key).and_then(|v| v.as_str()) {
                self.storage.set(key, raw)?;
            }
        }
        self.reload()
    }

    /// Clear every collection key and fall back to the seed bootstrap.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        for key in COLLECTION_KEYS {
            self.storage.remove(key)?;
        }
        self.custom_range = None;
        self.reload()
    }
}
