// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::budgets::overall_usage;
use crate::api::{ApiClient, Resource};
use crate::models::Budget;
use crate::utils::{fmt_fcfa, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let client = ApiClient::from_settings(conn)?;
            let profile = client.profile()?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &profile)? {
                return Ok(());
            }
            let budgets: Vec<Budget> = client.list(Resource::Budgets)?;
            let name = [profile.first_name.as_deref(), profile.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            let rows = vec![
                vec!["Name".to_string(), name],
                vec!["Email".to_string(), profile.email.unwrap_or_default()],
                vec![
                    "Monthly budget".to_string(),
                    profile
                        .monthly_budget
                        .map(|b| fmt_fcfa(&b))
                        .unwrap_or_else(|| "(not set)".to_string()),
                ],
                vec![
                    "Budget used".to_string(),
                    format!("{}%", overall_usage(&budgets)),
                ],
            ];
            println!("{}", pretty_table(&["Profile", ""], rows));
        }
        Some(("set-budget", sub)) => {
            let raw = sub.get_one::<String>("amount").unwrap();
            let amount = parse_decimal(raw)?;
            if amount < Decimal::ZERO {
                return Err(anyhow!("Monthly budget cannot be negative, got '{}'", raw));
            }
            let client = ApiClient::from_settings(conn)?;
            let updated = client.update_profile(&json!({ "monthly_budget": amount }))?;
            println!(
                "Monthly budget set to {}",
                fmt_fcfa(&updated.monthly_budget.unwrap_or(amount))
            );
        }
        _ => {}
    }
    Ok(())
}
