// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring schedule engine. The only mutable state per definition is
//! the next-due-date (plus the active flag); processing a definition
//! materializes a ledger entry and advances the due date in one
//! transaction, so a failure can neither duplicate nor lose a charge.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::models::{Frequency, RecurringExpense};
use crate::utils::now_timestamp;

const SELECT_COLS: &str = "id, name, amount, category, subcategory, frequency, \
                           next_due_date, is_active, created_date, note";

#[allow(clippy::too_many_arguments)]
pub fn add_recurring(
    conn: &Connection,
    name: &str,
    amount: Decimal,
    category: &str,
    subcategory: &str,
    frequency: Frequency,
    next_due_date: NaiveDate,
    note: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recurring_expenses(name, amount, category, subcategory, frequency, \
                                        next_due_date, created_date, note) \
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            name,
            amount.to_string(),
            category,
            subcategory,
            frequency.as_str(),
            next_due_date,
            now_timestamp(),
            note
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_recurring(conn: &Connection, active_only: bool) -> Result<Vec<RecurringExpense>> {
    let sql = if active_only {
        format!(
            "SELECT {SELECT_COLS} FROM recurring_expenses WHERE is_active = 1 \
             ORDER BY next_due_date ASC, id ASC"
        )
    } else {
        format!("SELECT {SELECT_COLS} FROM recurring_expenses ORDER BY next_due_date ASC, id ASC")
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], RecurringExpense::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn set_recurring_active(conn: &Connection, id: i64, active: bool) -> Result<()> {
    let n = conn.execute(
        "UPDATE recurring_expenses SET is_active=?2 WHERE id=?1",
        params![id, active],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!(
            "Recurring expense with ID {id} not found"
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DueReport {
    pub due_expenses: Vec<RecurringExpense>,
    pub days_ahead: i64,
    pub cutoff_date: NaiveDate,
}

/// Active definitions due on or before `today + days_ahead`, soonest
/// first.
pub fn due_soon(conn: &Connection, today: NaiveDate, days_ahead: i64) -> Result<DueReport> {
    let cutoff = today
        .checked_add_signed(chrono::Duration::days(days_ahead))
        .ok_or_else(|| {
            LedgerError::Validation(format!("Look-ahead of {days_ahead} days is out of range"))
        })?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLS} FROM recurring_expenses \
         WHERE is_active = 1 AND next_due_date <= ?1 \
         ORDER BY next_due_date ASC, id ASC"
    ))?;
    let rows = stmt.query_map(params![cutoff], RecurringExpense::from_row)?;
    let mut due_expenses = Vec::new();
    for row in rows {
        due_expenses.push(row?);
    }
    Ok(DueReport {
        due_expenses,
        days_ahead,
        cutoff_date: cutoff,
    })
}

#[derive(Debug, Serialize)]
pub struct ProcessOutcome {
    pub name: String,
    pub expense_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub next_due_date: NaiveDate,
}

/// Materialize one charge and advance the schedule atomically. The new
/// due date is computed from the stored next-due-date, not from the
/// processing date, so late processing does not drift the schedule.
pub fn process(conn: &mut Connection, id: i64, process_date: NaiveDate) -> Result<ProcessOutcome> {
    let tx = conn.transaction()?;

    let row = tx
        .query_row(
            "SELECT name, amount, category, subcategory, frequency, next_due_date, note \
             FROM recurring_expenses WHERE id = ?1 AND is_active = 1",
            params![id],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, NaiveDate>(5)?,
                    r.get::<_, String>(6)?,
                ))
            },
        )
        .optional()?;
    let Some((name, amount_raw, category, subcategory, frequency_raw, current_due, note)) = row
    else {
        return Err(LedgerError::NotFound(format!(
            "Active recurring expense with ID {id} not found"
        )));
    };

    // A stored frequency outside the closed set is a configuration error;
    // bail before touching either table.
    let frequency = Frequency::from_str(&frequency_raw)?;
    let amount: Decimal = amount_raw
        .parse()
        .map_err(|_| LedgerError::Store(format!("Invalid stored amount '{amount_raw}'")))?;

    tx.execute(
        "INSERT INTO expenses(date, amount, category, subcategory, note) VALUES (?1,?2,?3,?4,?5)",
        params![
            process_date,
            amount_raw,
            category,
            subcategory,
            format!("Recurring: {name} - {note}")
        ],
    )?;
    let expense_id = tx.last_insert_rowid();

    let next_due = advance_due_date(current_due, frequency)?;
    tx.execute(
        "UPDATE recurring_expenses SET next_due_date = ?1 WHERE id = ?2",
        params![next_due, id],
    )?;

    tx.commit()?;
    Ok(ProcessOutcome {
        name,
        expense_id,
        date: process_date,
        amount,
        category,
        next_due_date: next_due,
    })
}

/// Advance a due date by one frequency unit.
///
/// Monthly and yearly steps keep the day-of-month; when the target month
/// is shorter, the day clamps to the last valid day of that month
/// (Jan 31 monthly -> Feb 29 in a leap year, Feb 29 yearly -> Feb 28).
pub fn advance_due_date(due: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let next = match frequency {
        Frequency::Weekly => due.checked_add_days(Days::new(7)),
        Frequency::Monthly => {
            let (year, month) = if due.month() == 12 {
                (due.year() + 1, 1)
            } else {
                (due.year(), due.month() + 1)
            };
            ymd_clamped(year, month, due.day())
        }
        Frequency::Yearly => ymd_clamped(due.year() + 1, due.month(), due.day()),
    };
    next.ok_or_else(|| LedgerError::Validation(format!("Cannot advance due date {due}")))
}

fn ymd_clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        // Day overflows the target month; use its last day instead.
        let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
    })
}
