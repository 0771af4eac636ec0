// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{filter_transactions, summarize, CategoryLookup};
use crate::api::{ApiClient, Resource};
use crate::models::{Category, CategoryRef, Transaction, TransactionInput, TxKind};
use crate::utils::{fmt_fcfa, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ApiClient::from_settings(conn)?.delete(Resource::Transactions, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive, got '{}'", s));
    }
    Ok(amount)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let input = TransactionInput {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        kind: sub.get_one::<String>("type").unwrap().parse()?,
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        category: sub.get_one::<i64>("category").copied(),
        merchant: sub.get_one::<String>("merchant").map(|s| s.trim().to_string()),
        notes: sub.get_one::<String>("notes").map(|s| s.trim().to_string()),
    };
    let client = ApiClient::from_settings(conn)?;
    let created: Transaction = client.create(Resource::Transactions, &input)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        input.kind,
        fmt_fcfa(&input.amount),
        input.date,
        input.description,
        created.id
    );
    Ok(())
}

/// Applies the flags given to `tx edit` on top of the stored record.
pub fn merge_edit(existing: &Transaction, sub: &clap::ArgMatches) -> Result<TransactionInput> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => existing
            .date
            .ok_or_else(|| anyhow!("Transaction {} has no date; pass --date", existing.id))?,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_amount(s)?,
        None => existing.amount_or_zero(),
    };
    let kind = match sub.get_one::<String>("type") {
        Some(s) => s.parse()?,
        None => existing.kind,
    };
    let category = match sub.get_one::<i64>("category") {
        Some(id) => Some(*id),
        None => match &existing.category {
            Some(CategoryRef::Id(id)) => Some(*id),
            Some(CategoryRef::Name(name)) => {
                return Err(anyhow!(
                    "Transaction {} refers to category '{}' by name; pass --category",
                    existing.id,
                    name
                ))
            }
            None => None,
        },
    };
    Ok(TransactionInput {
        amount,
        kind,
        category,
        date,
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .or_else(|| existing.description.clone())
            .unwrap_or_default(),
        merchant: sub
            .get_one::<String>("merchant")
            .map(|s| s.trim().to_string())
            .or_else(|| existing.merchant.clone()),
        notes: sub
            .get_one::<String>("notes")
            .map(|s| s.trim().to_string())
            .or_else(|| existing.notes.clone()),
    })
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let client = ApiClient::from_settings(conn)?;
    let existing: Transaction = client.get(Resource::Transactions, id)?;
    let input = merge_edit(&existing, sub)?;
    let _: Transaction = client.update(Resource::Transactions, id, &input)?;
    println!("Updated transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub description: String,
    pub category: String,
    pub merchant: String,
    pub amount: String,
}

/// Filtered rows, newest first; undated transactions sort last.
pub fn query_rows(
    transactions: &[Transaction],
    categories: &[Category],
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let search = sub.get_one::<String>("search").map(String::as_str);
    let mut hits = filter_transactions(transactions, categories, search, kind);
    hits.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        hits.truncate(*limit);
    }

    let lookup = CategoryLookup::new(categories);
    Ok(hits
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.map(|d| d.to_string()).unwrap_or_default(),
            kind: t.kind.to_string(),
            description: t.description.clone().unwrap_or_default(),
            category: lookup.resolve(t).name,
            merchant: t.merchant.clone().unwrap_or_default(),
            amount: match t.amount {
                Some(a) => format!("{:.2}", a),
                None => String::new(),
            },
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (transactions, categories) = if let Some(path) = sub.get_one::<String>("input") {
        let snap = super::read_snapshot(path)?;
        (snap.transactions, snap.categories)
    } else {
        let client = ApiClient::from_settings(conn)?;
        (
            client.list::<Transaction>(Resource::Transactions)?,
            client.list::<Category>(Resource::Categories)?,
        )
    };
    let data = query_rows(&transactions, &categories, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let shown = data.len();
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date,
                    r.kind,
                    r.description,
                    r.category,
                    r.merchant,
                    r.amount,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Description", "Category", "Merchant", "Amount"],
                rows,
            )
        );
        let totals = summarize(&transactions, &categories, None, chrono::Local::now().date_naive());
        println!(
            "Showing {} of {} | income {} | expenses {} | balance {}",
            shown,
            totals.transaction_count,
            fmt_fcfa(&totals.total_income),
            fmt_fcfa(&totals.total_expenses),
            fmt_fcfa(&totals.total_income.saturating_sub(totals.total_expenses)),
        );
    }
    Ok(())
}
