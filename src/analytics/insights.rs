// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Threshold rules that turn a summary into short advisory messages.
//!
//! Rules run in the order of [`RULES`]; their output is concatenated and cut
//! to [`MAX_INSIGHTS`] without reordering by severity.

use rust_decimal::Decimal;
use serde::Serialize;

use super::summary::{CategoryStat, MonthBucket};
use crate::models::Budget;
use crate::utils::{fmt_fcfa, percent_of, round_half_up};

pub const MAX_INSIGHTS: usize = 3;
pub const SAVINGS_TARGET: i64 = 20;
pub const HIGH_SAVINGS_RATE: i64 = 30;
pub const SPENDING_INCREASE_PCT: i64 = 10;
pub const SPENDING_DECREASE_PCT: i64 = 5;
pub const BUDGET_ALERT_USAGE: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    HighSpendingCategory,
    LowSavingsRate,
    HighSavingsRate,
    SpendingIncrease,
    SpendingDecrease,
    BudgetsNearLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub rule: InsightRule,
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    /// The figure the rule fired on: a share, a rate, a delta or a count.
    pub amount: Option<Decimal>,
}

impl Insight {
    fn new(
        rule: InsightRule,
        kind: InsightKind,
        title: impl Into<String>,
        message: impl Into<String>,
        icon: &str,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            rule,
            kind,
            title: title.into(),
            message: message.into(),
            icon: icon.to_string(),
            amount,
        }
    }
}

pub struct InsightInputs<'a> {
    /// Sorted descending by total.
    pub category_stats: &'a [CategoryStat],
    pub total_expenses: Decimal,
    pub savings_rate: i64,
    /// Chronological.
    pub monthly_data: &'a [MonthBucket],
    pub budgets: Option<&'a [Budget]>,
}

pub type Rule = fn(&InsightInputs<'_>) -> Vec<Insight>;

pub const RULES: &[Rule] = &[
    high_spending_categories,
    savings_rate,
    month_over_month,
    budgets_near_limit,
];

pub fn generate(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    RULES
        .iter()
        .flat_map(|rule| rule(inputs))
        .take(MAX_INSIGHTS)
        .collect()
}

/// One warning per category holding more than 30% of total spending.
pub fn high_spending_categories(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let threshold = inputs.total_expenses.saturating_mul(Decimal::new(3, 1));
    inputs
        .category_stats
        .iter()
        .filter(|s| s.total > threshold)
        .map(|s| {
            let share = percent_of(s.total, inputs.total_expenses);
            Insight::new(
                InsightRule::HighSpendingCategory,
                InsightKind::Warning,
                format!("High Spending: {}", s.name),
                format!(
                    "{} accounts for {}% of your spending ({}).",
                    s.name,
                    share,
                    fmt_fcfa(&s.total)
                ),
                "⚠️",
                Some(Decimal::from(share)),
            )
        })
        .collect()
}

pub fn savings_rate(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let rate = inputs.savings_rate;
    if rate < SAVINGS_TARGET {
        vec![Insight::new(
            InsightRule::LowSavingsRate,
            InsightKind::Warning,
            "Low Savings Rate",
            format!(
                "You're saving {}% of your income. Aim for at least {}%.",
                rate, SAVINGS_TARGET
            ),
            "📉",
            Some(Decimal::from(rate)),
        )]
    } else if rate > HIGH_SAVINGS_RATE {
        vec![Insight::new(
            InsightRule::HighSavingsRate,
            InsightKind::Success,
            "Great Saving",
            format!("You're saving {}% of your income. Great job!", rate),
            "🎯",
            Some(Decimal::from(rate)),
        )]
    } else {
        Vec::new()
    }
}

/// Compares expenses of the last two month buckets present.
pub fn month_over_month(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let [.., prev, last] = inputs.monthly_data else {
        return Vec::new();
    };
    if prev.expenses <= Decimal::ZERO {
        return Vec::new();
    }
    let delta = last.expenses.saturating_sub(prev.expenses);
    let change = match delta
        .checked_div(prev.expenses)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(c) => c,
        None => return Vec::new(),
    };

    if change > Decimal::from(SPENDING_INCREASE_PCT) {
        vec![Insight::new(
            InsightRule::SpendingIncrease,
            InsightKind::Warning,
            "Spending Increase",
            format!(
                "Expenses in {} are up {}% on {} ({} more).",
                last.label,
                round_half_up(change),
                prev.label,
                fmt_fcfa(&delta)
            ),
            "📈",
            Some(delta),
        )]
    } else if change < -Decimal::from(SPENDING_DECREASE_PCT) {
        let saved = -delta;
        vec![Insight::new(
            InsightRule::SpendingDecrease,
            InsightKind::Success,
            "Spending Decrease",
            format!(
                "You spent {} less in {} than in {}.",
                fmt_fcfa(&saved),
                last.label,
                prev.label
            ),
            "💰",
            Some(saved),
        )]
    } else {
        Vec::new()
    }
}

pub fn budgets_near_limit(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let Some(budgets) = inputs.budgets else {
        return Vec::new();
    };
    let limit = Decimal::from(BUDGET_ALERT_USAGE);
    let at_risk = budgets.iter().filter(|b| b.usage() >= limit).count();
    if at_risk == 0 {
        return Vec::new();
    }
    let verb = if at_risk > 1 { "budgets are" } else { "budget is" };
    vec![Insight::new(
        InsightRule::BudgetsNearLimit,
        InsightKind::Warning,
        "Budget Alert",
        format!("{} {} near the limit.", at_risk, verb),
        "🔔",
        Some(Decimal::from(at_risk)),
    )]
}
