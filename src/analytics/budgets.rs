// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::insights::BUDGET_ALERT_USAGE;
use super::lookup::CategoryLookup;
use crate::models::{Budget, Category};
use crate::utils::{percent_of, round_half_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    Exceeded,
}

impl BudgetStatus {
    pub fn from_usage(usage: Decimal) -> Self {
        if usage >= Decimal::ONE_HUNDRED {
            BudgetStatus::Exceeded
        } else if usage >= Decimal::from(BUDGET_ALERT_USAGE) {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "On track",
            BudgetStatus::NearLimit => "Near limit",
            BudgetStatus::Exceeded => "Exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category: String,
    pub icon: String,
    pub amount: Decimal,
    pub spent: Decimal,
    /// Negative once the ceiling is passed.
    pub remaining: Decimal,
    pub usage: i64,
    pub status: BudgetStatus,
}

pub fn progress(budgets: &[Budget], categories: &[Category]) -> Vec<BudgetProgress> {
    let lookup = CategoryLookup::new(categories);
    budgets
        .iter()
        .map(|b| {
            let cat = lookup.resolve_ref(b.category.as_ref(), None);
            let amount = b.amount.unwrap_or(Decimal::ZERO);
            let spent = spent_of(b);
            let usage = b.usage();
            BudgetProgress {
                budget_id: b.id,
                category: cat.name,
                icon: cat.icon,
                amount,
                spent,
                remaining: amount.saturating_sub(spent),
                usage: round_half_up(usage),
                status: BudgetStatus::from_usage(usage),
            }
        })
        .collect()
}

/// Combined usage across every budget, as a whole percent.
///
/// A budget without `spent_amount` contributes `usage() * amount / 100`.
pub fn overall_usage(budgets: &[Budget]) -> i64 {
    let (spent, amount) = budgets.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(spent, amount), b| {
            (
                spent.saturating_add(spent_of(b)),
                amount.saturating_add(b.amount.unwrap_or(Decimal::ZERO)),
            )
        },
    );
    percent_of(spent, amount)
}

fn spent_of(b: &Budget) -> Decimal {
    if let Some(spent) = b.spent_amount {
        return spent;
    }
    b.amount
        .unwrap_or(Decimal::ZERO)
        .checked_mul(b.usage())
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
