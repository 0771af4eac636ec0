// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetlens::api::decode_list;
use budgetlens::models::{Budget, Category, CategoryRef, Snapshot, Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn transaction_fields_decode_leniently() {
    let t: Transaction = serde_json::from_value(json!({
        "id": "7",
        "amount": "1250.75",
        "type": "income",
        "category": "3",
        "date": "2025-04-02T10:00:00Z",
        "description": "Invoice",
        "merchant": null
    }))
    .unwrap();
    assert_eq!(t.id, 7);
    assert_eq!(t.amount, Some(Decimal::new(125075, 2)));
    assert_eq!(t.kind, TxKind::Income);
    assert_eq!(t.category, Some(CategoryRef::Id(3)));
    assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 4, 2));
    assert_eq!(t.description.as_deref(), Some("Invoice"));
    assert_eq!(t.merchant, None);
}

#[test]
fn garbage_values_become_defaults() {
    let t: Transaction = serde_json::from_value(json!({
        "id": 1,
        "amount": {"oops": true},
        "type": null,
        "category": [],
        "date": "31/12/2025"
    }))
    .unwrap();
    assert_eq!(t.amount, None);
    assert_eq!(t.amount_or_zero(), Decimal::ZERO);
    assert_eq!(t.kind, TxKind::Expense);
    assert_eq!(t.category, None);
    assert_eq!(t.date, None);
}

#[test]
fn type_is_case_sensitive() {
    let t: Transaction = serde_json::from_value(json!({"id": 1, "type": "Income"})).unwrap();
    assert_eq!(t.kind, TxKind::Expense);
    assert_eq!("Income".parse::<TxKind>().unwrap(), TxKind::Income);
    assert!("refund".parse::<TxKind>().is_err());
}

#[test]
fn category_reference_shapes() {
    let by_name: Transaction =
        serde_json::from_value(json!({"id": 1, "category": "Housing"})).unwrap();
    assert_eq!(by_name.category, Some(CategoryRef::Name("Housing".into())));

    let nested: Transaction =
        serde_json::from_value(json!({"id": 2, "category": {"id": 5, "name": "Dining"}})).unwrap();
    assert_eq!(nested.category, Some(CategoryRef::Id(5)));

    let blank: Transaction = serde_json::from_value(json!({"id": 3, "category": "  "})).unwrap();
    assert_eq!(blank.category, None);
}

#[test]
fn scientific_amount_parses() {
    let t: Transaction = serde_json::from_value(json!({"id": 1, "amount": 1.5e3})).unwrap();
    assert_eq!(t.amount, Some(Decimal::from(1500)));
}

#[test]
fn budget_usage_falls_back_to_ratio() {
    let b: Budget =
        serde_json::from_value(json!({"id": 1, "amount": "200", "spent_amount": "50"})).unwrap();
    assert_eq!(b.usage(), Decimal::from(25));

    let zero: Budget = serde_json::from_value(json!({"id": 2, "amount": 0, "spent_amount": 10}))
        .unwrap();
    assert_eq!(zero.usage(), Decimal::ZERO);

    let given: Budget = serde_json::from_value(
        json!({"id": 3, "amount": 100, "spent_amount": 10, "percentage_used": 90}),
    )
    .unwrap();
    assert_eq!(given.usage(), Decimal::from(90));
}

#[test]
fn snapshot_tolerates_null_lists() {
    let s: Snapshot =
        serde_json::from_value(json!({"transactions": null, "categories": [{"id": 1, "name": "X"}]}))
            .unwrap();
    assert!(s.transactions.is_empty());
    assert!(s.budgets.is_empty());
    assert_eq!(s.categories.len(), 1);
    assert_eq!(s.categories[0].kind, TxKind::Expense);
}

#[test]
fn list_responses_accept_pages_and_arrays() {
    let page: Vec<Category> =
        decode_list(json!({"count": 1, "next": null, "results": [{"id": 4, "name": "Gift", "type": "income"}]}))
            .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].kind, TxKind::Income);

    let bare: Vec<Category> = decode_list(json!([{"id": 4, "name": "Gift"}])).unwrap();
    assert_eq!(bare[0].name, "Gift");

    let empty: Vec<Category> = decode_list(serde_json::Value::Null).unwrap();
    assert!(empty.is_empty());

    assert!(decode_list::<Category>(json!("nope")).is_err());
}

#[test]
fn malformed_rows_are_skipped() {
    let s: Snapshot = serde_json::from_value(json!({
        "transactions": [null, {"id": 1, "amount": 5}, "junk", {"id": 2, "amount": 7}],
        "categories": [42, {"id": 3, "name": "Gift"}],
        "budgets": [null]
    }))
    .unwrap();
    let ids: Vec<i64> = s.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(s.categories.len(), 1);
    assert!(s.budgets.is_empty());

    let page: Vec<Transaction> =
        decode_list(json!({"results": [{"id": 9}, null, true]})).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 9);

    let bare: Vec<Transaction> = decode_list(json!([null, {"id": 4}])).unwrap();
    assert_eq!(bare.len(), 1);
}
