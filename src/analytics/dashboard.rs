// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::summary::{savings_rate, Accumulator, CategoryStat, MonthKey};
use crate::models::{Category, Transaction};
use crate::utils::days_in_month;

pub const TOP_CATEGORIES: usize = 5;
pub const RECENT_TRANSACTIONS: usize = 5;

/// The dashboard's "this month" card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSnapshot {
    pub month: MonthKey,
    pub month_name: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: i64,
    pub top_categories: Vec<CategoryStat>,
    pub active_categories: usize,
    pub recent: Vec<Transaction>,
    pub days_left: u32,
}

/// Figures for the calendar month containing `now`.
///
/// Only dated transactions can fall inside the month; `recent` is drawn from
/// the whole list, newest first, with undated entries last.
pub fn month_snapshot(
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDate,
) -> MonthSnapshot {
    let month = MonthKey::of(now);
    let mut acc = Accumulator::new(categories);
    for tx in transactions
        .iter()
        .filter(|t| t.date.map(MonthKey::of) == Some(month))
    {
        acc.fold(tx);
    }
    let totals = acc.finish();

    let active_categories = totals.category_stats.len();
    let mut top_categories = totals.category_stats;
    top_categories.truncate(TOP_CATEGORIES);

    let mut recent: Vec<Transaction> = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_TRANSACTIONS);

    MonthSnapshot {
        month,
        month_name: now.format("%B").to_string(),
        income: totals.total_income,
        expenses: totals.total_expenses,
        balance: totals.total_income.saturating_sub(totals.total_expenses),
        savings_rate: savings_rate(totals.total_income, totals.total_expenses),
        top_categories,
        active_categories,
        recent,
        days_left: days_in_month(now).saturating_sub(now.day()),
    }
}
