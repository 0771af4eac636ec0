// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod exporter;
pub mod profile;
pub mod summary;
pub mod transactions;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::api::ApiClient;
use crate::models::Snapshot;

pub fn read_snapshot(path: &str) -> Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot '{}'", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid snapshot JSON in '{}'", path))
}

/// Inputs for the analytics commands: `--input FILE` when given, the API otherwise.
pub fn load_snapshot(conn: &Connection, sub: &clap::ArgMatches) -> Result<Snapshot> {
    if let Some(path) = sub.get_one::<String>("input") {
        return read_snapshot(path);
    }
    let client = ApiClient::from_settings(conn)?;
    let defaults = categories::default_categories();
    Ok(client.fetch_snapshot(&defaults)?)
}

pub fn as_of(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => crate::utils::parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
