// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, Resource};
use crate::models::{Category, CategoryInput, TxKind};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Categories a new account starts with: (name, type, icon, color).
pub const DEFAULT_CATEGORIES: &[(&str, TxKind, &str, &str)] = &[
    ("Salary", TxKind::Income, "💰", "green"),
    ("Freelance", TxKind::Income, "💻", "blue"),
    ("Investment", TxKind::Income, "📈", "purple"),
    ("Business", TxKind::Income, "🏢", "indigo"),
    ("Gift", TxKind::Income, "🎁", "pink"),
    ("Housing", TxKind::Expense, "🏠", "blue"),
    ("Groceries", TxKind::Expense, "🛒", "green"),
    ("Dining", TxKind::Expense, "🍽️", "orange"),
    ("Transportation", TxKind::Expense, "🚗", "amber"),
    ("Entertainment", TxKind::Expense, "🎬", "purple"),
    ("Utilities", TxKind::Expense, "💡", "yellow"),
    ("Shopping", TxKind::Expense, "🛍️", "pink"),
    ("Healthcare", TxKind::Expense, "🏥", "red"),
    ("Education", TxKind::Expense, "📚", "indigo"),
    ("Insurance", TxKind::Expense, "🛡️", "cyan"),
    ("Subscriptions", TxKind::Expense, "📱", "emerald"),
    ("Other", TxKind::Expense, "📦", "gray"),
];

pub fn default_categories() -> Vec<CategoryInput> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, kind, icon, color)| CategoryInput {
            name: name.to_string(),
            kind: *kind,
            icon: icon.to_string(),
            color: color.to_string(),
        })
        .collect()
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let client = ApiClient::from_settings(conn)?;
            let mut cats: Vec<Category> = client.list(Resource::Categories)?;
            if let Some(t) = sub.get_one::<String>("type") {
                let kind: TxKind = t.parse()?;
                cats.retain(|c| c.kind == kind);
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.icon.unwrap_or_default(),
                            c.name,
                            c.kind.to_string(),
                            c.color.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Icon", "Category", "Type", "Color"], data)
                );
            }
        }
        Some(("add", sub)) => {
            let input = CategoryInput {
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                kind: sub.get_one::<String>("type").unwrap().parse()?,
                icon: sub.get_one::<String>("icon").unwrap().to_string(),
                color: sub.get_one::<String>("color").unwrap().to_string(),
            };
            let client = ApiClient::from_settings(conn)?;
            let created: Category = client.create(Resource::Categories, &input)?;
            println!("Added category '{}' (id {})", created.name, created.id);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let client = ApiClient::from_settings(conn)?;
            let existing: Category = client.get(Resource::Categories, id)?;
            let input = merge_edit(&existing, sub)?;
            let _: Category = client.update(Resource::Categories, id, &input)?;
            println!("Updated category {}", id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ApiClient::from_settings(conn)?.delete(Resource::Categories, id)?;
            println!("Removed category {}", id);
        }
        Some(("seed", _)) => {
            let client = ApiClient::from_settings(conn)?;
            let created = client.seed_categories(&default_categories());
            println!(
                "Created {} of {} default categories",
                created.len(),
                DEFAULT_CATEGORIES.len()
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn merge_edit(existing: &Category, sub: &clap::ArgMatches) -> Result<CategoryInput> {
    let kind = match sub.get_one::<String>("type") {
        Some(t) => t.parse()?,
        None => existing.kind,
    };
    let pick = |key: &str, current: Option<&str>, fallback: &str| {
        sub.get_one::<String>(key)
            .map(|s| s.trim().to_string())
            .or_else(|| current.map(str::to_string))
            .unwrap_or_else(|| fallback.to_string())
    };
    Ok(CategoryInput {
        name: pick("name", Some(existing.name.as_str()), ""),
        kind,
        icon: pick("icon", existing.icon.as_deref(), crate::analytics::lookup::DEFAULT_ICON),
        color: pick("color", existing.color.as_deref(), crate::analytics::lookup::DEFAULT_COLOR),
    })
}
