// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::budgets::{overall_usage, progress};
use crate::api::{ApiClient, Resource};
use crate::models::{Budget, BudgetInput, Category, CategoryRef};
use crate::utils::{fmt_fcfa, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("add", sub)) => {
            let input = BudgetInput {
                category: *sub.get_one::<i64>("category").unwrap(),
                amount: parse_ceiling(sub.get_one::<String>("amount").unwrap())?,
            };
            let client = ApiClient::from_settings(conn)?;
            let created: Budget = client.create(Resource::Budgets, &input)?;
            println!(
                "Budget {} set for category {} = {}",
                created.id,
                input.category,
                fmt_fcfa(&input.amount)
            );
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let client = ApiClient::from_settings(conn)?;
            let existing: Budget = client.get(Resource::Budgets, id)?;
            let input = merge_edit(&existing, sub)?;
            let _: Budget = client.update(Resource::Budgets, id, &input)?;
            println!("Updated budget {}", id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ApiClient::from_settings(conn)?.delete(Resource::Budgets, id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_ceiling(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Budget amount must be positive, got '{}'", s));
    }
    Ok(amount)
}

pub fn merge_edit(existing: &Budget, sub: &clap::ArgMatches) -> Result<BudgetInput> {
    let category = match sub.get_one::<i64>("category") {
        Some(id) => *id,
        None => match &existing.category {
            Some(CategoryRef::Id(id)) => *id,
            _ => return Err(anyhow!("Budget {} has no category id; pass --category", existing.id)),
        },
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_ceiling(s)?,
        None => existing.amount.unwrap_or(Decimal::ZERO),
    };
    Ok(BudgetInput { category, amount })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client = ApiClient::from_settings(conn)?;
    let budgets: Vec<Budget> = client.list(Resource::Budgets)?;
    let categories: Vec<Category> = client.list(Resource::Categories)?;
    let rows = progress(&budgets, &categories);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|p| {
                vec![
                    p.budget_id.to_string(),
                    format!("{} {}", p.icon, p.category),
                    fmt_fcfa(&p.amount),
                    fmt_fcfa(&p.spent),
                    fmt_fcfa(&p.remaining),
                    format!("{}%", p.usage),
                    p.status.label().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Budget", "Spent", "Remaining", "Used", "Status"],
                data
            )
        );
        println!("Overall: {}% of budgeted amount used", overall_usage(&budgets));
    }
    Ok(())
}
