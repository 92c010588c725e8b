// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: create/read/update/delete and range/keyword queries over
//! expense records. Categories are advisory free text; amounts are signed
//! and not validated.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result, Status};
use crate::models::{Expense, ExpenseDraft, ExpenseUpdate};
use crate::utils::{parse_date, parse_decimal};

const SELECT_COLS: &str = "id, date, amount, category, subcategory, note";

pub fn insert(
    conn: &Connection,
    date: NaiveDate,
    amount: Decimal,
    category: &str,
    subcategory: &str,
    note: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(date, amount, category, subcategory, note) VALUES (?1,?2,?3,?4,?5)",
        params![date, amount.to_string(), category, subcategory, note],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Expenses with date in the inclusive range, newest first (equal dates
/// tie-break on id so the latest insert comes first).
pub fn list_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLS} FROM expenses WHERE date BETWEEN ?1 AND ?2 \
         ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![start, end], Expense::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Case-insensitive keyword match against category, subcategory, or note.
/// Either date bound may be supplied on its own.
pub fn search(
    conn: &Connection,
    keyword: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Expense>> {
    let mut sql = format!(
        "SELECT {SELECT_COLS} FROM expenses \
         WHERE (category LIKE ?1 OR subcategory LIKE ?1 OR note LIKE ?1)"
    );
    let pattern = format!("%{}%", keyword);
    let mut params_vec: Vec<String> = vec![pattern];
    if let Some(s) = start {
        sql.push_str(&format!(" AND date >= ?{}", params_vec.len() + 1));
        params_vec.push(s.to_string());
    }
    if let Some(e) = end {
        sql.push_str(&format!(" AND date <= ?{}", params_vec.len() + 1));
        params_vec.push(e.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), Expense::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Expense> {
    let found = conn
        .query_row(
            &format!("SELECT {SELECT_COLS} FROM expenses WHERE id=?1"),
            params![id],
            Expense::from_row,
        )
        .optional()?;
    found.ok_or_else(|| LedgerError::NotFound(format!("Expense with ID {id} not found")))
}

/// Apply the provided fields, retain the rest, and return the resulting
/// record. The statement is fixed: each mutable field has one optional
/// slot resolved with COALESCE.
pub fn update(conn: &Connection, id: i64, fields: &ExpenseUpdate) -> Result<Expense> {
    // Existence first, so an empty field set on a missing id reports NotFound.
    get_by_id(conn, id)?;
    if fields.is_empty() {
        return Err(LedgerError::Validation(
            "No fields provided to update".into(),
        ));
    }
    conn.execute(
        "UPDATE expenses SET \
             date = COALESCE(?2, date), \
             amount = COALESCE(?3, amount), \
             category = COALESCE(?4, category), \
             subcategory = COALESCE(?5, subcategory), \
             note = COALESCE(?6, note) \
         WHERE id = ?1",
        params![
            id,
            fields.date,
            fields.amount.map(|a| a.to_string()),
            fields.category,
            fields.subcategory,
            fields.note
        ],
    )?;
    get_by_id(conn, id)
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!(
            "Expense with ID {id} not found"
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BulkInsertReport {
    pub status: Status,
    pub added_count: usize,
    pub total_count: usize,
    pub errors: Vec<String>,
}

/// Per-row best-effort insert. A bad row is reported by its 1-based
/// position and never aborts rows already inserted; the batch is
/// intentionally non-atomic.
pub fn bulk_insert(conn: &Connection, drafts: &[ExpenseDraft]) -> Result<BulkInsertReport> {
    let mut added = 0usize;
    let mut errors = Vec::new();
    for (i, draft) in drafts.iter().enumerate() {
        match insert_draft(conn, draft) {
            Ok(_) => added += 1,
            Err(e) => errors.push(format!("Row {}: {}", i + 1, e)),
        }
    }
    let status = if errors.is_empty() {
        Status::Success
    } else {
        Status::PartialSuccess
    };
    Ok(BulkInsertReport {
        status,
        added_count: added,
        total_count: drafts.len(),
        errors,
    })
}

fn insert_draft(conn: &Connection, draft: &ExpenseDraft) -> Result<i64> {
    let date = parse_date(&draft.date)?;
    let amount = parse_decimal(&draft.amount)?;
    insert(
        conn,
        date,
        amount,
        &draft.category,
        &draft.subcategory,
        &draft.note,
    )
}
