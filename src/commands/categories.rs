// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::categories;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = categories::categories_path()?;
    let list = categories::load(&path)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &list)? {
        let rows: Vec<Vec<String>> = list.categories.iter().map(|c| vec![c.clone()]).collect();
        println!("{}", pretty_table(&["Category"], rows));
    }
    Ok(())
}
