// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::ledger;
use crate::models::ExpenseDraft;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn import_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut drafts = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        drafts.push(ExpenseDraft {
            date: rec.get(0).unwrap_or("").trim().to_string(),
            amount: rec.get(1).unwrap_or("").trim().to_string(),
            category: rec.get(2).unwrap_or("").trim().to_string(),
            subcategory: rec.get(3).unwrap_or("").trim().to_string(),
            note: rec.get(4).unwrap_or("").trim().to_string(),
        });
    }

    let report = ledger::bulk_insert(conn, &drafts)?;
    println!(
        "{}: {} of {} rows added",
        report.status.as_str(),
        report.added_count,
        report.total_count
    );
    for err in &report.errors {
        eprintln!("  {}", err);
    }
    Ok(())
}
