// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod dashboard;
pub mod insights;
pub mod lookup;
pub mod summary;

pub use dashboard::{month_snapshot, MonthSnapshot};
pub use insights::{Insight, InsightKind, InsightRule};
pub use lookup::{CategoryLookup, ResolvedCategory};
pub use summary::{
    summarize, CategoryStat, FinancialSummary, LargestCategory, MonthBucket, MonthKey,
};

use crate::models::{Category, Transaction, TxKind};

/// Search box and type tabs of the transaction list.
///
/// `search` matches case-insensitively against description, resolved
/// category name and merchant.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
    search: Option<&str>,
    kind: Option<TxKind>,
) -> Vec<&'a Transaction> {
    let lookup = CategoryLookup::new(categories);
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    transactions
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| match &needle {
            None => true,
            Some(n) => {
                let hit = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase().contains(n));
                hit(t.description.as_deref())
                    || hit(Some(lookup.resolve(t).name.as_str()))
                    || hit(t.merchant.as_deref())
            }
        })
        .collect()
}
