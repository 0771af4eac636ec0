// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, CategoryRef, CategorySnapshot, Transaction};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_COLOR: &str = "gray";
pub const DEFAULT_ICON: &str = "📦";

/// Display identity of a category after fallbacks have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCategory {
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl ResolvedCategory {
    pub fn uncategorized() -> Self {
        Self::labelled(UNCATEGORIZED)
    }

    fn labelled(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }

    fn from_category(c: &Category) -> Self {
        Self {
            id: Some(c.id),
            name: non_empty(Some(c.name.as_str())).unwrap_or(UNCATEGORIZED).to_string(),
            color: non_empty(c.color.as_deref())
                .unwrap_or(DEFAULT_COLOR)
                .to_string(),
            icon: non_empty(c.icon.as_deref()).unwrap_or(DEFAULT_ICON).to_string(),
        }
    }

    fn from_snapshot(s: &CategorySnapshot, name: &str, fallback_id: Option<i64>) -> Self {
        Self {
            id: s.id.or(fallback_id),
            name: name.to_string(),
            color: non_empty(s.color.as_deref())
                .unwrap_or(DEFAULT_COLOR)
                .to_string(),
            icon: non_empty(s.icon.as_deref()).unwrap_or(DEFAULT_ICON).to_string(),
        }
    }
}

/// Resolves category references against the live category list.
///
/// Order of precedence: live category (by id, or by name for free-text
/// references), then the transaction's embedded `category_details`, then
/// the `Uncategorized` sentinel. A free-text name that matches nothing keeps
/// its own name with the default color and icon.
pub struct CategoryLookup<'a> {
    by_id: HashMap<i64, &'a Category>,
    by_name: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryLookup<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        let mut by_name = HashMap::with_capacity(categories.len());
        for c in categories {
            by_id.entry(c.id).or_insert(c);
            by_name.entry(c.name.as_str()).or_insert(c);
        }
        Self { by_id, by_name }
    }

    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    pub fn resolve(&self, tx: &Transaction) -> ResolvedCategory {
        self.resolve_ref(tx.category.as_ref(), tx.category_details.as_ref())
    }

    pub fn resolve_ref(
        &self,
        reference: Option<&CategoryRef>,
        snapshot: Option<&CategorySnapshot>,
    ) -> ResolvedCategory {
        let live = match reference {
            Some(CategoryRef::Id(id)) => self.by_id.get(id).copied(),
            Some(CategoryRef::Name(name)) => self.by_name.get(name.as_str()).copied(),
            None => None,
        };
        if let Some(c) = live {
            return ResolvedCategory::from_category(c);
        }

        let ref_id = match reference {
            Some(CategoryRef::Id(id)) => Some(*id),
            _ => None,
        };
        if let Some(s) = snapshot {
            if let Some(name) = non_empty(s.name.as_deref()) {
                return ResolvedCategory::from_snapshot(s, name, ref_id);
            }
        }

        match reference {
            Some(CategoryRef::Name(name)) => ResolvedCategory::labelled(name),
            _ => ResolvedCategory::uncategorized(),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
