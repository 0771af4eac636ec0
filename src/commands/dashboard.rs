// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{month_snapshot, summarize, FinancialSummary, MonthSnapshot};
use crate::utils::{fmt_fcfa, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Serialize)]
pub struct DashboardView {
    pub month: MonthSnapshot,
    pub summary: FinancialSummary,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = super::load_snapshot(conn, sub)?;
    let now = super::as_of(sub)?;
    let view = DashboardView {
        month: month_snapshot(&snapshot.transactions, &snapshot.categories, now),
        summary: summarize(
            &snapshot.transactions,
            &snapshot.categories,
            Some(snapshot.budgets.as_slice()),
            now,
        ),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print_dashboard(&view);
    }
    Ok(())
}

fn print_dashboard(v: &DashboardView) {
    let m = &v.month;
    println!(
        "{} {} ({} days left)",
        m.month_name, m.month.year, m.days_left
    );
    let card = vec![vec![
        fmt_fcfa(&m.income),
        fmt_fcfa(&m.expenses),
        fmt_fcfa(&m.balance),
        format!("{}%", m.savings_rate),
        m.active_categories.to_string(),
    ]];
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance", "Savings rate", "Categories"],
            card
        )
    );

    if !m.top_categories.is_empty() {
        let rows = m
            .top_categories
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", c.icon, c.name),
                    fmt_fcfa(&c.total),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Top spending", "Amount", "Share"], rows)
        );
    }

    if !m.recent.is_empty() {
        let rows = m
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                    t.kind.to_string(),
                    fmt_fcfa(&t.amount_or_zero()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Recent", "Type", "Amount"], rows)
        );
    }

    super::summary::print_insights(&v.summary.insights);
}
