// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Records exchanged with the finance API.
//!
//! The API hands back loosely shaped JSON, so every field that feeds the
//! analytics engine decodes leniently: a bad amount becomes `None`, a bad
//! date becomes `None`, an unknown `type` becomes an expense. Decoding a
//! record only fails when the payload is not an object at all.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    #[default]
    Expense,
}

impl TxKind {
    /// Only the exact string `"income"` is income; everything else is spend.
    pub fn from_value(v: &Value) -> Self {
        match v.as_str() {
            Some("income") => TxKind::Income,
            _ => TxKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income or expense",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for TxKind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(TxKind::from_value(&v))
    }
}

/// How a transaction or budget points at its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRef::Id(id) => write!(f, "#{}", id),
            CategoryRef::Name(name) => f.write_str(name),
        }
    }
}

/// Denormalized copy of a category stored alongside a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    #[serde(default, deserialize_with = "de_id_opt")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: Option<Decimal>,
    #[serde(rename = "type", default)]
    pub kind: TxKind,
    #[serde(default, deserialize_with = "de_category_ref")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "de_snapshot")]
    pub category_details: Option<CategorySnapshot>,
    #[serde(default, deserialize_with = "de_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub merchant: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_name")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TxKind,
    #[serde(default, deserialize_with = "de_text")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_category_ref")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_amount")]
    pub spent_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_amount")]
    pub percentage_used: Option<Decimal>,
}

impl Budget {
    /// Percentage of the ceiling already spent. Falls back to
    /// `spent_amount / amount` when the API omitted the derived field.
    pub fn usage(&self) -> Decimal {
        if let Some(p) = self.percentage_used {
            return p;
        }
        let amount = self.amount.unwrap_or(Decimal::ZERO);
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.spent_amount
            .unwrap_or(Decimal::ZERO)
            .checked_div(amount)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub monthly_budget: Option<Decimal>,
}

/// One consistent set of inputs for the analytics engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "de_list")]
    pub transactions: Vec<Transaction>,
    #[serde(default, deserialize_with = "de_list")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "de_list")]
    pub budgets: Vec<Budget>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionInput {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetInput {
    pub category: i64,
    pub amount: Decimal,
}

pub fn decimal_from_value(v: &Value) -> Option<Decimal> {
    let raw = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

pub fn date_from_value(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            s.get(..10)
                .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        })
}

pub fn category_ref_from_value(v: &Value) -> Option<CategoryRef> {
    match v {
        Value::Number(n) => n.as_i64().map(CategoryRef::Id),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if let Ok(id) = s.parse::<i64>() {
                Some(CategoryRef::Id(id))
            } else {
                Some(CategoryRef::Name(s.to_string()))
            }
        }
        // nested serializer output: {"id": 3, "name": "..."}
        Value::Object(map) => map
            .get("id")
            .and_then(category_ref_from_value)
            .filter(|r| matches!(r, CategoryRef::Id(_))),
        _ => None,
    }
}

fn id_from_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(de_id_opt(d)?.unwrap_or_default())
}

fn de_id_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(id_from_value))
}

fn de_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(decimal_from_value))
}

fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(date_from_value))
}

fn de_category_ref<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CategoryRef>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(category_ref_from_value))
}

fn de_snapshot<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<CategorySnapshot>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
        _ => None,
    })
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn de_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(de_text(d)?.unwrap_or_default())
}

/// Keeps the rows that decode; a `null` or malformed row is dropped.
pub fn rows_from_values<T: DeserializeOwned>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

fn de_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let rows = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    Ok(rows_from_values(rows))
}
