// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Frequency;
use crate::recurring;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, today};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("due", sub)) => due(conn, sub)?,
        Some(("process", sub)) => process(conn, sub)?,
        Some(("activate", sub)) => set_active(conn, sub, true)?,
        Some(("deactivate", sub)) => set_active(conn, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let subcategory = sub.get_one::<String>("subcategory").unwrap();
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let note = sub.get_one::<String>("note").unwrap();

    let id = recurring::add_recurring(
        conn, name, amount, category, subcategory, frequency, due, note,
    )?;
    println!(
        "Recurring '{}' added (id: {}), {} {} due {}",
        name,
        id,
        amount,
        frequency.as_str(),
        due
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let active_only = !sub.get_flag("all");
    let data = recurring::list_recurring(conn, active_only)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print_recurring_table(&data);
    }
    Ok(())
}

fn due(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let days = *sub.get_one::<i64>("days").unwrap();
    let as_of = sub
        .get_one::<String>("as-of")
        .map(|s| parse_date(s))
        .transpose()?
        .unwrap_or_else(today);
    let report = recurring::due_soon(conn, as_of, days)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        println!(
            "{} due on or before {}",
            report.due_expenses.len(),
            report.cutoff_date
        );
        print_recurring_table(&report.due_expenses);
    }
    Ok(())
}

fn process(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?
        .unwrap_or_else(today);
    let outcome = recurring::process(conn, id, date)?;
    println!(
        "Processed '{}': {} in '{}' on {} (expense id: {}), next due {}",
        outcome.name,
        outcome.amount,
        outcome.category,
        outcome.date,
        outcome.expense_id,
        outcome.next_due_date
    );
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    recurring::set_recurring_active(conn, id, active)?;
    println!(
        "Recurring {} {}",
        id,
        if active { "activated" } else { "deactivated" }
    );
    Ok(())
}

fn print_recurring_table(data: &[crate::models::RecurringExpense]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                fmt_money(&r.amount),
                r.category.clone(),
                r.frequency.as_str().to_string(),
                r.next_due_date.to_string(),
                if r.is_active { "active" } else { "inactive" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Amount", "Category", "Frequency", "Next due", "State"],
            rows
        )
    );
}
