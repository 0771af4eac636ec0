// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetlens::api::{ApiClient, ApiError, Resource};
use budgetlens::db;
use rusqlite::Connection;

#[test]
fn urls_keep_trailing_slash() {
    let client = ApiClient::new("http://localhost:8000/api/", None).unwrap();
    assert_eq!(
        client.url(Resource::Transactions.path()),
        "http://localhost:8000/api/transactions/"
    );
    assert_eq!(
        client.url("/users/profile"),
        "http://localhost:8000/api/users/profile/"
    );
}

#[test]
fn blank_base_is_not_configured() {
    assert!(matches!(
        ApiClient::new("  ", None),
        Err(ApiError::NotConfigured)
    ));
}

#[test]
fn client_reads_settings() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::set_api_url(&conn, "https://budget.example.org/api").unwrap();
    let client = ApiClient::from_settings(&conn).unwrap();
    assert_eq!(
        client.url(Resource::Budgets.path()),
        "https://budget.example.org/api/budgets/"
    );
}
