// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::GroupBy;
use crate::reports;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        Some(("stats", sub)) => stats(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let data = reports::summarize(conn, start, end, category)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_money(&r.total_amount),
                    r.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub.get_one::<i32>("year").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if let Some(&month) = sub.get_one::<u32>("month") {
        let data = reports::month_summary(conn, year, month)?;
        if !maybe_print_json(json_flag, jsonl_flag, &data)? {
            println!(
                "{}-{:02}: {} across {} transactions",
                data.year,
                data.month,
                fmt_money(&data.total_amount),
                data.total_transactions
            );
            let rows: Vec<Vec<String>> = data
                .categories
                .iter()
                .map(|c| {
                    vec![
                        c.category.clone(),
                        fmt_money(&c.total_amount),
                        c.transaction_count.to_string(),
                        fmt_money(&c.avg_amount),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Category", "Total", "Count", "Average"], rows)
            );
        }
    } else {
        let data = reports::year_summary(conn, year)?;
        if !maybe_print_json(json_flag, jsonl_flag, &data)? {
            let rows: Vec<Vec<String>> = data
                .iter()
                .map(|r| {
                    vec![
                        r.month_name.to_string(),
                        fmt_money(&r.total_amount),
                        r.transaction_count.to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Month", "Total", "Count"], rows));
        }
    }
    Ok(())
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let data = reports::top_expenses(conn, start, end, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    fmt_money(&e.amount),
                    e.category.clone(),
                    e.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Category", "Note"], rows)
        );
    }
    Ok(())
}

fn stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let data = reports::statistics(conn, start, end)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let b = &data.basic;
        let rows = vec![
            vec!["Transactions".into(), b.total_transactions.to_string()],
            vec!["Total".into(), fmt_money(&b.total_amount)],
            vec!["Average".into(), fmt_money(&b.average_amount)],
            vec!["Min".into(), fmt_money(&b.min_amount)],
            vec!["Max".into(), fmt_money(&b.max_amount)],
            vec!["Daily average".into(), fmt_money(&b.daily_average)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
        let rows: Vec<Vec<String>> = data
            .category_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.total),
                    c.count.to_string(),
                    fmt_money(&c.average),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Count", "Average"], rows)
        );
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let group_by: GroupBy = sub.get_one::<String>("group-by").unwrap().parse()?;
    let data = reports::category_trend(conn, category, start, end, group_by)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.period.clone(),
                    fmt_money(&b.total_amount),
                    b.transaction_count.to_string(),
                    fmt_money(&b.avg_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Period", "Total", "Count", "Average"], rows)
        );
    }
    Ok(())
}
