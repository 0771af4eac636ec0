// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{clear_token, db_path, get_api_url, get_token, set_api_url, set_token};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            set_api_url(conn, url)?;
            println!("API url set to {}", get_api_url(conn)?);
        }
        Some(("set-token", sub)) => {
            let token = sub.get_one::<String>("token").unwrap();
            set_token(conn, token)?;
            println!("Access token saved");
        }
        Some(("clear-token", _)) => {
            clear_token(conn)?;
            println!("Access token removed");
        }
        Some(("show", _)) | None => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let token = match get_token(conn)? {
        Some(t) => mask(&t),
        None => "(not set)".to_string(),
    };
    let rows = vec![
        vec!["api_url".to_string(), get_api_url(conn)?],
        vec!["access_token".to_string(), token],
        vec!["settings_db".to_string(), db_path()?.display().to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn mask(token: &str) -> String {
    let tail: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}
