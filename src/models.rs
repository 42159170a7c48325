// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of glyph identifiers a renderer may map to real icons.
/// Unknown names stored by older snapshots deserialize to `Wallet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    #[default]
    Wallet,
    Bank,
    Card,
    Cash,
    PiggyBank,
    Chart,
    Cart,
    Utensils,
    House,
    Car,
    Plane,
    Gift,
    Briefcase,
    Heart,
    Book,
    Bolt,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Wallet => "wallet",
            Icon::Bank => "bank",
            Icon::Card => "card",
            Icon::Cash => "cash",
            Icon::PiggyBank => "piggy-bank",
            Icon::Chart => "chart",
            Icon::Cart => "cart",
            Icon::Utensils => "utensils",
            Icon::House => "house",
            Icon::Car => "car",
            Icon::Plane => "plane",
            Icon::Gift => "gift",
            Icon::Briefcase => "briefcase",
            Icon::Heart => "heart",
            Icon::Book => "book",
            Icon::Bolt => "bolt",
        }
    }

    pub fn from_name(s: &str) -> Icon {
        match s {
            "bank" => Icon::Bank,
            "card" => Icon::Card,
            "cash" => Icon::Cash,
            "piggy-bank" => Icon::PiggyBank,
            "chart" => Icon::Chart,
            "cart" => Icon::Cart,
            "utensils" => Icon::Utensils,
            "house" => Icon::House,
            "car" => Icon::Car,
            "plane" => Icon::Plane,
            "gift" => Icon::Gift,
            "briefcase" => Icon::Briefcase,
            "heart" => Icon::Heart,
            "book" => Icon::Book,
            "bolt" => Icon::Bolt,
            _ => Icon::Wallet,
        }
    }
}

impl From<String> for Icon {
    fn from(s: String) -> Self {
        Icon::from_name(&s)
    }
}

impl From<Icon> for String {
    fn from(i: Icon) -> Self {
        i.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Income,
    Expense,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryScope {
    Account,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
    Transfer,
    Alter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub routing_number: String,
    pub card_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
    pub category_id: String,
    pub icon: Icon,
    pub color: String,
    pub is_savings: bool,
    pub bank: Option<BankDetails>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub id: String,
    pub name: String,
    pub kind: StreamKind,
    pub icon: Icon,
    pub color: String,
    pub category_id: Option<String>,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub scope: CategoryScope,
    pub icon: Icon,
    pub color: String,
    pub custom_svg: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single transaction event. Which account references are set depends on
/// `kind`: income uses `to_account_id`, expense uses `from_account_id`,
/// transfer uses both, alter uses neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub amount: Decimal,
    pub from_account_id: Option<String>,
    pub to_account_id: Option<String>,
    pub stream_id: String,
    pub note: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub stream_id: Option<String>,
    pub category_id: Option<String>,
    pub limit: Decimal,
    /// Cached consumption over [start_date, end_date]; the store refreshes
    /// it on every record mutation touching the budget's scope.
    pub spent: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub account_id: String,
    pub target: Decimal,
    pub current: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// Drafts carry everything but the generated id/created_at; patches are
// shallow merges where `None` leaves the field untouched.

#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub name: String,
    pub balance: Decimal,
    pub category_id: String,
    pub icon: Icon,
    pub color: String,
    pub is_savings: bool,
    pub bank: Option<BankDetails>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
    pub category_id: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub is_savings: Option<bool>,
    pub bank: Option<BankDetails>,
}

#[derive(Debug, Clone)]
pub struct StreamDraft {
    pub name: String,
    pub kind: StreamKind,
    pub icon: Icon,
    pub color: String,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamPatch {
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub scope: CategoryScope,
    pub icon: Icon,
    pub color: String,
    pub custom_svg: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub custom_svg: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub kind: RecordKind,
    pub amount: Decimal,
    pub from_account_id: Option<String>,
    pub to_account_id: Option<String>,
    pub stream_id: String,
    pub note: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub amount: Option<Decimal>,
    pub from_account_id: Option<String>,
    pub to_account_id: Option<String>,
    pub stream_id: Option<String>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub stream_id: Option<String>,
    pub category_id: Option<String>,
    pub limit: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub stream_id: Option<String>,
    pub category_id: Option<String>,
    pub limit: Option<Decimal>,
    pub period: Option<Period>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct SavingsDraft {
    pub account_id: String,
    pub target: Decimal,
    pub current: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct SavingsPatch {
    pub account_id: Option<String>,
    pub target: Option<Decimal>,
    pub current: Option<Decimal>,
    pub period: Option<Period>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl StreamKind {
    pub fn label(&self) -> &'static str {
        match self {
            StreamKind::Income => "income",
            StreamKind::Expense => "expense",
            StreamKind::System => "system",
        }
    }
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::Transfer => "transfer",
            RecordKind::Alter => "alter",
        }
    }
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }
}
