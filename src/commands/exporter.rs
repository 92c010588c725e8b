// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::utils::parse_date;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let out = sub.get_one::<String>("out").unwrap();

    let data = ledger::list_range(conn, start, end)?;
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["date", "amount", "category", "subcategory", "note"])?;
    for e in &data {
        wtr.write_record([
            e.date.to_string(),
            e.amount.to_string(),
            e.category.clone(),
            e.subcategory.clone(),
            e.note.clone(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported {} expenses to {}", data.len(), out);
    Ok(())
}
