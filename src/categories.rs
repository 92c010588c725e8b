// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static category list resource. Advisory only: the ledger accepts any
//! free-text category and never validates against this list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Business",
    "Other",
];

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

impl CategoryList {
    pub fn default_list() -> Self {
        CategoryList {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `categories.json` beside the store overrides the built-in list.
pub fn categories_path() -> Result<PathBuf> {
    Ok(crate::db::db_path()?
        .parent()
        .context("Store path has no parent dir")?
        .join("categories.json"))
}

pub fn load(path: &Path) -> Result<CategoryList> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read categories from {}", path.display()))?;
        let list: CategoryList = serde_json::from_str(&raw)
            .with_context(|| format!("Parse categories from {}", path.display()))?;
        Ok(list)
    } else {
        Ok(CategoryList::default_list())
    }
}
