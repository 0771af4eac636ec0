// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{summarize, CategoryLookup};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Serialize)]
struct ExportRow {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    description: String,
    category: String,
    merchant: String,
    notes: String,
    amount: String,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub)?,
        Some(("summary", sub)) => export_summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let format = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    check_format(format)?;

    let snapshot = super::load_snapshot(conn, sub)?;
    let lookup = CategoryLookup::new(&snapshot.categories);
    let mut txs: Vec<_> = snapshot.transactions.iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let items: Vec<ExportRow> = txs
        .into_iter()
        .map(|t| ExportRow {
            id: t.id,
            date: t.date.map(|d| d.to_string()).unwrap_or_default(),
            kind: t.kind.to_string(),
            description: t.description.clone().unwrap_or_default(),
            category: lookup.resolve(t).name,
            merchant: t.merchant.clone().unwrap_or_default(),
            notes: t.notes.clone().unwrap_or_default(),
            amount: t.amount_or_zero().to_string(),
        })
        .collect();

    if format == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        for item in &items {
            wtr.serialize(item)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", items.len(), out);
    Ok(())
}

fn export_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let format = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    check_format(format)?;

    let snapshot = super::load_snapshot(conn, sub)?;
    let now = super::as_of(sub)?;
    let summary = summarize(&snapshot.transactions, &snapshot.categories, None, now);

    if format == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["month", "income", "expenses", "savings"])?;
        for m in &summary.monthly_data {
            wtr.write_record([
                m.key.to_string(),
                m.income.to_string(),
                m.expenses.to_string(),
                m.savings.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&summary)?)?;
    }
    println!("Exported summary to {}", out);
    Ok(())
}

fn check_format(format: &str) -> Result<()> {
    match format {
        "csv" | "json" => Ok(()),
        other => Err(anyhow!("Unknown format '{}', expected csv or json", other)),
    }
}
