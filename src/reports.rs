// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation engine: pure computations over ledger reads. Callers
//! always supply explicit date windows; nothing here infers "this month".
//! Amounts are accumulated as decimals in Rust so totals stay exact.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::models::{decimal_column, Expense, GroupBy};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: Decimal,
    pub count: i64,
}

/// Sum and count per category over an inclusive range, largest total
/// first. An explicit category narrows the summary to that category.
pub fn summarize(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    category: Option<&str>,
) -> Result<Vec<CategorySummary>> {
    let mut agg: HashMap<String, (Decimal, i64)> = HashMap::new();
    for (_date, amount, cat) in range_rows(conn, start, end, category)? {
        let entry = agg.entry(cat).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    let mut data: Vec<CategorySummary> = agg
        .into_iter()
        .map(|(category, (total_amount, count))| CategorySummary {
            category,
            total_amount,
            count,
        })
        .collect();
    data.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(data)
}

#[derive(Debug, Serialize)]
pub struct MonthCategoryRow {
    pub category: String,
    pub total_amount: Decimal,
    pub transaction_count: i64,
    pub avg_amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total_amount: Decimal,
    pub total_transactions: i64,
    pub categories: Vec<MonthCategoryRow>,
}

/// Per-category breakdown plus grand total for one calendar month.
pub fn month_summary(conn: &Connection, year: i32, month: u32) -> Result<MonthSummary> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::Validation(format!("Invalid month {year}-{month:02}")))?;
    // Exclusive upper bound: first day of the following month.
    let end_excl = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| LedgerError::Validation(format!("Invalid month {year}-{month:02}")))?;

    let mut stmt = conn.prepare(
        "SELECT amount, category FROM expenses WHERE date >= ?1 AND date < ?2",
    )?;
    let rows = stmt.query_map(params![start, end_excl], |r| {
        Ok((decimal_column(r, 0)?, r.get::<_, String>(1)?))
    })?;

    let mut agg: HashMap<String, (Decimal, i64)> = HashMap::new();
    let mut total = Decimal::ZERO;
    let mut count = 0i64;
    for row in rows {
        let (amount, cat) = row?;
        total += amount;
        count += 1;
        let entry = agg.entry(cat).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    let mut categories: Vec<MonthCategoryRow> = agg
        .into_iter()
        .map(|(category, (total_amount, n))| MonthCategoryRow {
            category,
            total_amount,
            transaction_count: n,
            avg_amount: total_amount / Decimal::from(n),
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(MonthSummary {
        year,
        month,
        total_amount: total,
        total_transactions: count,
        categories,
    })
}

#[derive(Debug, Serialize)]
pub struct YearMonthRow {
    pub month: u32,
    pub month_name: &'static str,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

/// Totals bucketed by calendar month for one year; only months with data
/// appear.
pub fn year_summary(conn: &Connection, year: i32) -> Result<Vec<YearMonthRow>> {
    let mut stmt =
        conn.prepare("SELECT date, amount FROM expenses WHERE substr(date,1,4)=?1")?;
    let rows = stmt.query_map(params![format!("{year:04}")], |r| {
        Ok((r.get::<_, NaiveDate>(0)?, decimal_column(r, 1)?))
    })?;
    let mut agg: BTreeMap<u32, (Decimal, i64)> = BTreeMap::new();
    for row in rows {
        let (date, amount) = row?;
        let entry = agg.entry(date.month()).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    Ok(agg
        .into_iter()
        .map(|(month, (total_amount, transaction_count))| YearMonthRow {
            month,
            month_name: MONTH_NAMES[(month - 1) as usize],
            total_amount,
            transaction_count,
        })
        .collect())
}

/// The N highest-amount expenses in a range, amount descending with ties
/// kept in store order.
pub fn top_expenses(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    limit: usize,
) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount, category, subcategory, note FROM expenses \
         WHERE date BETWEEN ?1 AND ?2 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![start, end], Expense::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    // Stable sort preserves insertion order among equal amounts.
    data.sort_by(|a, b| b.amount.cmp(&a.amount));
    data.truncate(limit);
    Ok(data)
}

#[derive(Debug, Serialize)]
pub struct BasicStats {
    pub total_transactions: i64,
    pub total_amount: Decimal,
    pub average_amount: Decimal,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub daily_average: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub count: i64,
    pub total: Decimal,
    pub average: Decimal,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub basic: BasicStats,
    pub category_breakdown: Vec<CategoryStats>,
}

/// Count/total/average/min/max over a range plus a per-category
/// breakdown. The daily average divides by the number of distinct dates
/// present, and is zero (not a division error) on an empty range.
pub fn statistics(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Statistics> {
    let mut count = 0i64;
    let mut total = Decimal::ZERO;
    let mut min: Option<Decimal> = None;
    let mut max: Option<Decimal> = None;
    let mut days: HashSet<NaiveDate> = HashSet::new();
    let mut agg: HashMap<String, (Decimal, i64)> = HashMap::new();

    for (date, amount, cat) in range_rows(conn, start, end, None)? {
        count += 1;
        total += amount;
        min = Some(min.map_or(amount, |m| m.min(amount)));
        max = Some(max.map_or(amount, |m| m.max(amount)));
        days.insert(date);
        let entry = agg.entry(cat).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let average = if count > 0 {
        total / Decimal::from(count)
    } else {
        Decimal::ZERO
    };
    let daily_average = total / Decimal::from(days.len().max(1) as i64);

    let mut category_breakdown: Vec<CategoryStats> = agg
        .into_iter()
        .map(|(category, (t, n))| CategoryStats {
            category,
            count: n,
            total: t,
            average: t / Decimal::from(n),
        })
        .collect();
    category_breakdown.sort_by(|a, b| {
        b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category))
    });

    Ok(Statistics {
        start_date: start,
        end_date: end,
        basic: BasicStats {
            total_transactions: count,
            total_amount: total,
            average_amount: average,
            min_amount: min.unwrap_or(Decimal::ZERO),
            max_amount: max.unwrap_or(Decimal::ZERO),
            daily_average,
        },
        category_breakdown,
    })
}

#[derive(Debug, Serialize)]
pub struct TrendBucket {
    pub period: String,
    pub total_amount: Decimal,
    pub transaction_count: i64,
    pub avg_amount: Decimal,
}

/// Spend trend for one category, bucketed by day, week, or month, bucket
/// keys ascending.
///
/// Week keys use the `%W` week-of-year numbering, which restarts at each
/// January 1st: a week straddling a year boundary is split across two
/// buckets. Known limitation, kept as-is.
pub fn category_trend(
    conn: &Connection,
    category: &str,
    start: NaiveDate,
    end: NaiveDate,
    group_by: GroupBy,
) -> Result<Vec<TrendBucket>> {
    let mut agg: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    for (date, amount, _cat) in range_rows(conn, start, end, Some(category))? {
        let key = match group_by {
            GroupBy::Day => date.to_string(),
            GroupBy::Week => date.format("%Y-W%W").to_string(),
            GroupBy::Month => date.format("%Y-%m").to_string(),
        };
        let entry = agg.entry(key).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    Ok(agg
        .into_iter()
        .map(|(period, (total_amount, n))| TrendBucket {
            period,
            total_amount,
            transaction_count: n,
            avg_amount: total_amount / Decimal::from(n),
        })
        .collect())
}

fn range_rows(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    category: Option<&str>,
) -> Result<Vec<(NaiveDate, Decimal, String)>> {
    let mut sql =
        String::from("SELECT date, amount, category FROM expenses WHERE date BETWEEN ?1 AND ?2");
    let mut params_vec: Vec<String> = vec![start.to_string(), end.to_string()];
    if let Some(cat) = category {
        sql.push_str(" AND category = ?3");
        params_vec.push(cat.to_string());
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), |r| {
        Ok((
            r.get::<_, NaiveDate>(0)?,
            decimal_column(r, 1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
