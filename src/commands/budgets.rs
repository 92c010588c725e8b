// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::budgets;
use crate::models::{BudgetUpdate, Period};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    let id = budgets::create_budget(conn, category, amount, period, start, end)?;
    println!(
        "Budget {} created for '{}': {} per {}",
        id,
        category,
        amount,
        period.as_str()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let active_only = !sub.get_flag("all");
    let data = budgets::list_budgets(conn, active_only)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category.clone(),
                    fmt_money(&b.amount),
                    b.period.as_str().to_string(),
                    b.start_date.to_string(),
                    b.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    if b.is_active { "active" } else { "inactive" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Amount", "Period", "Start", "End", "State"],
                rows
            )
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let fields = BudgetUpdate {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        is_active: sub.get_one::<bool>("active").copied(),
        end_date: sub
            .get_one::<String>("end")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    let updated = budgets::update_budget(conn, id, &fields)?;
    println!(
        "Budget {} updated: {} for '{}' ({})",
        updated.id,
        updated.amount,
        updated.category,
        if updated.is_active { "active" } else { "inactive" }
    );
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let data = budgets::budget_status(conn, start, end)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.budget_id.to_string(),
                    s.category.clone(),
                    fmt_money(&s.budget_amount),
                    fmt_money(&s.spent_amount),
                    fmt_money(&s.remaining_amount),
                    format!("{}%", s.percentage_used),
                    s.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Budget", "Spent", "Remaining", "Used", "Status"],
                rows
            )
        );
    }
    Ok(())
}
