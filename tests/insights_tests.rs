// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetlens::analytics::insights::{self, InsightInputs};
use budgetlens::analytics::{summarize, InsightKind, InsightRule, MonthBucket, MonthKey};
use budgetlens::models::{Budget, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

fn txs(v: serde_json::Value) -> Vec<Transaction> {
    serde_json::from_value(v).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
}

fn bucket(month: u32, expenses: i64) -> MonthBucket {
    let key = MonthKey { year: 2025, month };
    MonthBucket {
        key,
        label: key.label(),
        income: Decimal::ZERO,
        expenses: Decimal::from(expenses),
        savings: -Decimal::from(expenses),
    }
}

fn inputs<'a>(months: &'a [MonthBucket], budgets: Option<&'a [Budget]>) -> InsightInputs<'a> {
    InsightInputs {
        category_stats: &[],
        total_expenses: Decimal::ZERO,
        savings_rate: 25,
        monthly_data: months,
        budgets,
    }
}

#[test]
fn low_savings_rate_warns() {
    let t = txs(json!([
        {"id": 1, "type": "income", "amount": 1000, "date": "2025-02-01"},
        {"id": 2, "type": "expense", "amount": 174, "category": "A", "date": "2025-02-02"},
        {"id": 3, "type": "expense", "amount": 174, "category": "B", "date": "2025-02-03"},
        {"id": 4, "type": "expense", "amount": 174, "category": "C", "date": "2025-02-04"},
        {"id": 5, "type": "expense", "amount": 174, "category": "D", "date": "2025-02-05"},
        {"id": 6, "type": "expense", "amount": 174, "category": "E", "date": "2025-02-06"}
    ]));
    let s = summarize(&t, &[], None, today());
    assert_eq!(s.savings_rate, 13);
    assert_eq!(s.insights.len(), 1);
    assert_eq!(s.insights[0].rule, InsightRule::LowSavingsRate);
    assert_eq!(s.insights[0].kind, InsightKind::Warning);
    assert_eq!(s.insights[0].title, "Low Savings Rate");
}

#[test]
fn rate_between_thresholds_is_silent() {
    let out = insights::savings_rate(&inputs(&[], None));
    assert!(out.is_empty());
}

#[test]
fn great_saving_above_thirty() {
    let mut i = inputs(&[], None);
    i.savings_rate = 31;
    let out = insights::savings_rate(&i);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Great Saving");
    assert_eq!(out[0].kind, InsightKind::Success);

    i.savings_rate = 30;
    assert!(insights::savings_rate(&i).is_empty());
}

#[test]
fn spending_increase_threshold_is_strict() {
    let months = [bucket(1, 100), bucket(2, 110)];
    assert!(insights::month_over_month(&inputs(&months, None)).is_empty());

    let months = [bucket(1, 100), bucket(2, 111)];
    let out = insights::month_over_month(&inputs(&months, None));
    assert_eq!(out[0].rule, InsightRule::SpendingIncrease);
    assert_eq!(out[0].amount, Some(Decimal::from(11)));
}

#[test]
fn spending_decrease_reports_saving() {
    let months = [bucket(1, 200), bucket(2, 150)];
    let out = insights::month_over_month(&inputs(&months, None));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].rule, InsightRule::SpendingDecrease);
    assert_eq!(out[0].kind, InsightKind::Success);
    assert_eq!(out[0].amount, Some(Decimal::from(50)));

    let months = [bucket(1, 100), bucket(2, 95)];
    assert!(insights::month_over_month(&inputs(&months, None)).is_empty());
}

#[test]
fn month_over_month_needs_two_months_and_prior_spend() {
    let one = [bucket(2, 100)];
    assert!(insights::month_over_month(&inputs(&one, None)).is_empty());

    let zero_prev = [bucket(1, 0), bucket(2, 100)];
    assert!(insights::month_over_month(&inputs(&zero_prev, None)).is_empty());
}

#[test]
fn only_last_two_buckets_compared() {
    let months = [bucket(1, 1000), bucket(2, 100), bucket(3, 100)];
    assert!(insights::month_over_month(&inputs(&months, None)).is_empty());
}

#[test]
fn budget_alert_counts_budgets_at_eighty_percent() {
    let budgets: Vec<Budget> = serde_json::from_value(json!([
        {"id": 1, "category": 1, "amount": 100, "spent_amount": 80},
        {"id": 2, "category": 2, "amount": 100, "spent_amount": 79},
        {"id": 3, "category": 3, "amount": "100", "percentage_used": "120.5"}
    ]))
    .unwrap();
    let out = insights::budgets_near_limit(&inputs(&[], Some(budgets.as_slice())));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Budget Alert");
    assert_eq!(out[0].amount, Some(Decimal::from(2)));
}

#[test]
fn budget_alert_skipped_without_budgets() {
    assert!(insights::budgets_near_limit(&inputs(&[], None)).is_empty());
    let none: Vec<Budget> = Vec::new();
    assert!(insights::budgets_near_limit(&inputs(&[], Some(none.as_slice()))).is_empty());
}

#[test]
fn rules_run_in_order_and_cap() {
    let budgets: Vec<Budget> = serde_json::from_value(json!([
        {"id": 1, "category": 1, "amount": 100, "spent_amount": 95}
    ]))
    .unwrap();
    let t = txs(json!([
        {"id": 1, "type": "income", "amount": 1000, "date": "2025-02-01"},
        {"id": 2, "type": "expense", "amount": 100, "category": "Rent", "date": "2025-01-02"},
        {"id": 3, "type": "expense", "amount": 200, "category": "Rent", "date": "2025-02-02"}
    ]));
    let s = summarize(&t, &[], Some(budgets.as_slice()), today());
    let rules: Vec<_> = s.insights.iter().map(|i| i.rule).collect();
    // high spending, great saving (70%), spending increase; budget alert is cut
    assert_eq!(
        rules,
        [
            InsightRule::HighSpendingCategory,
            InsightRule::HighSavingsRate,
            InsightRule::SpendingIncrease
        ]
    );
    assert_eq!(s.insights[0].title, "High Spending: Rent");
}
