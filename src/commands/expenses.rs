// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::models::{Expense, ExpenseUpdate};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("search", sub)) => search(conn, sub)?,
        Some(("get", sub)) => get(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let subcategory = sub.get_one::<String>("subcategory").unwrap();
    let note = sub.get_one::<String>("note").unwrap();

    let id = ledger::insert(conn, date, amount, category, subcategory, note)?;
    println!("Recorded {} on {} in '{}' (id: {})", amount, date, category, id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let data = ledger::list_range(conn, start, end)?;
    print_expenses(sub, &data)
}

fn search(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let keyword = sub.get_one::<String>("keyword").unwrap();
    let start = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let data = ledger::search(conn, keyword, start, end)?;
    print_expenses(sub, &data)
}

fn get(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let expense = ledger::get_by_id(conn, id)?;
    print_expenses(sub, std::slice::from_ref(&expense))
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let fields = ExpenseUpdate {
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        subcategory: sub.get_one::<String>("subcategory").cloned(),
        note: sub.get_one::<String>("note").cloned(),
    };
    let updated = ledger::update(conn, id, &fields)?;
    println!(
        "Updated expense {}: {} on {} in '{}'",
        updated.id, updated.amount, updated.date, updated.category
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::delete(conn, id)?;
    println!("Deleted expense {}", id);
    Ok(())
}

fn print_expenses(sub: &clap::ArgMatches, data: &[Expense]) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    fmt_money(&e.amount),
                    e.category.clone(),
                    e.subcategory.clone(),
                    e.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Category", "Subcategory", "Note"], rows)
        );
    }
    Ok(())
}
