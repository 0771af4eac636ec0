// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derives dashboard and analytics metrics from a transaction feed.
//!
//! Everything here is recomputed from scratch on each call. Bad input never
//! fails the computation: a missing amount counts as zero, an undated
//! transaction still contributes to totals but not to any month, and an
//! unknown category is grouped under `Uncategorized`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::insights::{self, Insight, InsightInputs};
use super::lookup::{CategoryLookup, ResolvedCategory};
use crate::models::{Budget, Category, Transaction, TxKind};
use crate::utils::{percent_of, round_half_up};

/// Number of trailing months kept in `monthly_data`.
pub const MONTH_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Three-letter month name, e.g. `Jan`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

impl MonthBucket {
    fn new(key: MonthKey) -> Self {
        Self {
            key,
            label: key.label(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            savings: Decimal::ZERO,
        }
    }

    fn add(&mut self, kind: TxKind, amount: Decimal) {
        match kind {
            TxKind::Income => self.income = self.income.saturating_add(amount),
            TxKind::Expense => self.expenses = self.expenses.saturating_add(amount),
        }
        self.savings = self.income.saturating_sub(self.expenses);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub name: String,
    pub category_id: Option<i64>,
    pub total: Decimal,
    pub count: usize,
    pub color: String,
    pub icon: String,
    /// Share of total expenses, rounded to a whole percent.
    pub percentage: i64,
}

impl CategoryStat {
    fn new(cat: ResolvedCategory) -> Self {
        Self {
            name: cat.name,
            category_id: cat.id,
            total: Decimal::ZERO,
            count: 0,
            color: cat.color,
            icon: cat.icon,
            percentage: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargestCategory {
    pub name: String,
    pub amount: Decimal,
}

impl LargestCategory {
    pub fn none() -> Self {
        Self {
            name: "None".to_string(),
            amount: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub as_of: NaiveDate,
    pub category_stats: Vec<CategoryStat>,
    pub monthly_data: Vec<MonthBucket>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub transaction_count: usize,
    pub avg_transaction_amount: Decimal,
    pub largest_category: LargestCategory,
    pub savings_rate: i64,
    pub insights: Vec<Insight>,
}

/// Totals produced by one pass over a transaction list.
pub(crate) struct Totals {
    pub count: usize,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub category_stats: Vec<CategoryStat>,
    pub months: Vec<MonthBucket>,
}

/// Single-pass fold shared by the summary and the dashboard month card.
pub(crate) struct Accumulator<'a> {
    lookup: CategoryLookup<'a>,
    count: usize,
    total_income: Decimal,
    total_expenses: Decimal,
    stats: Vec<CategoryStat>,
    stat_index: HashMap<String, usize>,
    months: BTreeMap<MonthKey, MonthBucket>,
}

impl<'a> Accumulator<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            lookup: CategoryLookup::new(categories),
            count: 0,
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            stats: Vec::new(),
            stat_index: HashMap::new(),
            months: BTreeMap::new(),
        }
    }

    pub fn fold(&mut self, tx: &Transaction) {
        let amount = tx.amount_or_zero();
        self.count += 1;

        match tx.kind {
            TxKind::Income => self.total_income = self.total_income.saturating_add(amount),
            TxKind::Expense => {
                self.total_expenses = self.total_expenses.saturating_add(amount);
                let cat = self.lookup.resolve(tx);
                let stats = &mut self.stats;
                let idx = *self
                    .stat_index
                    .entry(cat.name.clone())
                    .or_insert_with(|| {
                        stats.push(CategoryStat::new(cat));
                        stats.len() - 1
                    });
                let stat = &mut self.stats[idx];
                stat.total = stat.total.saturating_add(amount);
                stat.count += 1;
            }
        }

        if let Some(date) = tx.date {
            let key = MonthKey::of(date);
            self.months
                .entry(key)
                .or_insert_with(|| MonthBucket::new(key))
                .add(tx.kind, amount);
        }
    }

    pub fn finish(self) -> Totals {
        let mut category_stats = self.stats;
        // stable: equal totals keep first-seen order
        category_stats.sort_by(|a, b| b.total.cmp(&a.total));
        for stat in &mut category_stats {
            stat.percentage = percent_of(stat.total, self.total_expenses);
        }
        Totals {
            count: self.count,
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            category_stats,
            months: self.months.into_values().collect(),
        }
    }
}

/// `round((income - expenses) / income * 100)`, or 0 when income is not positive.
pub fn savings_rate(total_income: Decimal, total_expenses: Decimal) -> i64 {
    if total_income <= Decimal::ZERO {
        return 0;
    }
    total_income
        .saturating_sub(total_expenses)
        .checked_div(total_income)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_half_up)
        .unwrap_or(0)
}

/// Builds the full summary for `transactions` as seen on `now`.
///
/// `budgets` enables the budget-near-limit insight; pass `None` for views
/// that do not track budgets.
pub fn summarize(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: Option<&[Budget]>,
    now: NaiveDate,
) -> FinancialSummary {
    let mut acc = Accumulator::new(categories);
    for tx in transactions {
        acc.fold(tx);
    }
    let Totals {
        count,
        total_income,
        total_expenses,
        category_stats,
        months,
    } = acc.finish();

    let mut monthly_data = months;
    let excess = monthly_data.len().saturating_sub(MONTH_WINDOW);
    monthly_data.drain(..excess);

    let largest_category = category_stats
        .first()
        .map(|s| LargestCategory {
            name: s.name.clone(),
            amount: s.total,
        })
        .unwrap_or_else(LargestCategory::none);

    let savings_rate = savings_rate(total_income, total_expenses);

    let avg_transaction_amount = if count > 0 {
        total_income
            .saturating_add(total_expenses)
            .checked_div(Decimal::from(count))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let insights = if transactions.is_empty() {
        Vec::new()
    } else {
        insights::generate(&InsightInputs {
            category_stats: &category_stats,
            total_expenses,
            savings_rate,
            monthly_data: &monthly_data,
            budgets,
        })
    };

    tracing::debug!(
        transactions = count,
        categories = category_stats.len(),
        months = monthly_data.len(),
        insights = insights.len(),
        "summarized transactions"
    );

    FinancialSummary {
        as_of: now,
        category_stats,
        monthly_data,
        total_income,
        total_expenses,
        transaction_count: count,
        avg_transaction_amount,
        largest_category,
        savings_rate,
        insights,
    }
}
