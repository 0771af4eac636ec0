// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetlens::commands::{budgets, categories, transactions};
use budgetlens::models::{Budget, Category, CategoryRef, Transaction, TxKind};
use budgetlens::cli;
use rust_decimal::Decimal;
use serde_json::json;

fn setup() -> (Vec<Transaction>, Vec<Category>) {
    let cats: Vec<Category> = serde_json::from_value(json!([
        {"id": 1, "name": "Cat1", "type": "expense"}
    ]))
    .unwrap();
    let mut raw = Vec::new();
    for i in 1..=3 {
        raw.push(json!({
            "id": i, "type": "expense", "amount": "10", "category": 1,
            "date": format!("2025-01-0{}", i), "description": "P"
        }));
    }
    raw.push(json!({"id": 4, "type": "income", "amount": 500, "date": "2025-01-02", "description": "Pay"}));
    (serde_json::from_value(json!(raw)).unwrap(), cats)
}

fn tx_sub(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no tx subcommand"),
        },
        _ => panic!("no tx command"),
    }
}

#[test]
fn list_limit_respected() {
    let (txs, cats) = setup();
    let list_m = tx_sub(&["budgetlens", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&txs, &cats, &list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    // same date: higher id first
    assert_eq!(rows[1].id, 4);
}

#[test]
fn list_filters_by_type_and_search() {
    let (txs, cats) = setup();
    let list_m = tx_sub(&["budgetlens", "tx", "list", "--type", "income"]);
    let rows = transactions::query_rows(&txs, &cats, &list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "income");
    assert_eq!(rows[0].category, "Uncategorized");
    assert_eq!(rows[0].amount, "500.00");

    let list_m = tx_sub(&["budgetlens", "tx", "list", "--search", "cat1"]);
    let rows = transactions::query_rows(&txs, &cats, &list_m).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.category == "Cat1"));
}

#[test]
fn edit_keeps_unspecified_fields() {
    let (txs, _) = setup();
    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "2", "--amount", "12.5", "--notes", " split "]);
    let input = transactions::merge_edit(&txs[1], &edit_m).unwrap();
    assert_eq!(input.amount, Decimal::new(125, 1));
    assert_eq!(input.kind, TxKind::Expense);
    assert_eq!(input.category, Some(1));
    assert_eq!(input.date.to_string(), "2025-01-02");
    assert_eq!(input.description, "P");
    assert_eq!(input.notes.as_deref(), Some("split"));
}

#[test]
fn edit_rejects_non_positive_amount() {
    let (txs, _) = setup();
    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "2", "--amount", "0"]);
    assert!(transactions::merge_edit(&txs[1], &edit_m).is_err());
}

#[test]
fn edit_undated_requires_date() {
    let t: Transaction = serde_json::from_value(json!({"id": 9, "amount": 5})).unwrap();
    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "9", "--amount", "6"]);
    assert!(transactions::merge_edit(&t, &edit_m).is_err());
}

#[test]
fn category_edit_overrides_given_fields() {
    let existing: Category = serde_json::from_value(
        json!({"id": 3, "name": "Dining", "type": "expense", "icon": "🍽️", "color": "orange"}),
    )
    .unwrap();
    let matches = cli::build_cli().get_matches_from([
        "budgetlens", "category", "edit", "3", "--name", "Restaurants", "--color", "red",
    ]);
    let Some(("category", cat_m)) = matches.subcommand() else {
        panic!("no category command");
    };
    let Some(("edit", edit_m)) = cat_m.subcommand() else {
        panic!("no edit subcommand");
    };
    let input = categories::merge_edit(&existing, edit_m).unwrap();
    assert_eq!(input.name, "Restaurants");
    assert_eq!(input.color, "red");
    assert_eq!(input.icon, "🍽️");
    assert_eq!(input.kind, TxKind::Expense);
}

#[test]
fn default_categories_cover_both_types() {
    let defaults = categories::default_categories();
    assert_eq!(defaults.len(), 17);
    assert_eq!(defaults.iter().filter(|c| c.kind == TxKind::Income).count(), 5);
    assert_eq!(defaults.last().map(|c| c.name.as_str()), Some("Other"));
}

#[test]
fn budget_edit_needs_category_id() {
    let by_name = Budget {
        id: 1,
        category: Some(CategoryRef::Name("Food".into())),
        amount: Some(Decimal::from(100)),
        ..Default::default()
    };
    let matches =
        cli::build_cli().get_matches_from(["budgetlens", "budget", "edit", "1", "--amount", "150"]);
    let Some(("budget", b_m)) = matches.subcommand() else {
        panic!("no budget command");
    };
    let Some(("edit", edit_m)) = b_m.subcommand() else {
        panic!("no edit subcommand");
    };
    assert!(budgets::merge_edit(&by_name, edit_m).is_err());

    let by_id = Budget {
        category: Some(CategoryRef::Id(4)),
        ..by_name
    };
    let input = budgets::merge_edit(&by_id, edit_m).unwrap();
    assert_eq!(input.category, 4);
    assert_eq!(input.amount, Decimal::from(150));
}

#[test]
fn edit_of_named_category_requires_category_flag() {
    let t: Transaction = serde_json::from_value(json!({
        "id": 1, "type": "expense", "amount": 20, "category": "Groceries",
        "date": "2025-01-05", "description": "Market"
    }))
    .unwrap();
    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "1", "--notes", "x"]);
    let err = transactions::merge_edit(&t, &edit_m).unwrap_err();
    assert!(err.to_string().contains("--category"));

    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "1", "--notes", "x", "--category", "7"]);
    let input = transactions::merge_edit(&t, &edit_m).unwrap();
    assert_eq!(input.category, Some(7));
    assert_eq!(input.notes.as_deref(), Some("x"));
}

#[test]
fn edit_of_uncategorized_stays_uncategorized() {
    let t: Transaction = serde_json::from_value(json!({
        "id": 2, "type": "expense", "amount": 20, "date": "2025-01-05"
    }))
    .unwrap();
    let edit_m = tx_sub(&["budgetlens", "tx", "edit", "2", "--description", "Bus"]);
    let input = transactions::merge_edit(&t, &edit_m).unwrap();
    assert_eq!(input.category, None);
    assert_eq!(input.description, "Bus");
}
