// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetlens::db;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn api_url_defaults_and_normalizes() {
    let conn = setup();
    assert_eq!(db::get_api_url(&conn).unwrap(), db::DEFAULT_API_URL);

    db::set_api_url(&conn, " https://finance.example.com/api/ ").unwrap();
    assert_eq!(
        db::get_api_url(&conn).unwrap(),
        "https://finance.example.com/api"
    );

    assert!(db::set_api_url(&conn, "ftp://nope").is_err());
    assert_eq!(
        db::get_api_url(&conn).unwrap(),
        "https://finance.example.com/api"
    );
}

#[test]
fn token_roundtrip_and_clear() {
    let conn = setup();
    assert_eq!(db::get_token(&conn).unwrap(), None);

    db::set_token(&conn, "abc123\n").unwrap();
    assert_eq!(db::get_token(&conn).unwrap().as_deref(), Some("abc123"));

    db::set_token(&conn, "   ").unwrap();
    assert_eq!(db::get_token(&conn).unwrap(), None);

    db::set_token(&conn, "xyz").unwrap();
    db::clear_token(&conn).unwrap();
    assert_eq!(db::get_token(&conn).unwrap(), None);
}

#[test]
fn schema_init_is_idempotent() {
    let mut conn = setup();
    db::set_setting(&conn, "k", "v1").unwrap();
    db::init_schema(&mut conn).unwrap();
    db::set_setting(&conn, "k", "v2").unwrap();
    assert_eq!(db::get_setting(&conn, "k").unwrap().as_deref(), Some("v2"));
}
