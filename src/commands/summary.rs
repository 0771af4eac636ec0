// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{summarize, FinancialSummary};
use crate::utils::{fmt_fcfa, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = super::load_snapshot(conn, sub)?;
    let now = super::as_of(sub)?;
    // analytics view: budgets do not feed its insights
    let summary = summarize(&snapshot.transactions, &snapshot.categories, None, now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        print_summary(&summary);
    }
    Ok(())
}

pub fn print_summary(s: &FinancialSummary) {
    let overview = vec![
        vec!["Total income".to_string(), fmt_fcfa(&s.total_income)],
        vec!["Total expenses".to_string(), fmt_fcfa(&s.total_expenses)],
        vec!["Savings rate".to_string(), format!("{}%", s.savings_rate)],
        vec![
            "Avg transaction".to_string(),
            fmt_fcfa(&s.avg_transaction_amount),
        ],
        vec![
            "Largest category".to_string(),
            format!(
                "{} ({})",
                s.largest_category.name,
                fmt_fcfa(&s.largest_category.amount)
            ),
        ],
    ];
    println!("Summary as of {}", s.as_of);
    println!("{}", pretty_table(&["Metric", "Value"], overview));

    if !s.monthly_data.is_empty() {
        let months = s
            .monthly_data
            .iter()
            .map(|m| {
                vec![
                    m.key.to_string(),
                    fmt_fcfa(&m.income),
                    fmt_fcfa(&m.expenses),
                    fmt_fcfa(&m.savings),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Savings"], months)
        );
    }

    if !s.category_stats.is_empty() {
        let cats = s
            .category_stats
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", c.icon, c.name),
                    c.count.to_string(),
                    fmt_fcfa(&c.total),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Count", "Spent", "Share"], cats)
        );
    }

    print_insights(&s.insights);
}

pub fn print_insights(insights: &[crate::analytics::Insight]) {
    if insights.is_empty() {
        return;
    }
    println!("Insights:");
    for i in insights {
        println!("  {} {}: {}", i.icon, i.title, i.message);
    }
}
