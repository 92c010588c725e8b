// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget registry and evaluator. Budgets are never physically deleted:
//! the active flag is the deletion substitute. Category, period, and
//! start date are immutable after creation.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::models::{decimal_column, Budget, BudgetUpdate, Period};
use crate::utils::now_timestamp;

const SELECT_COLS: &str =
    "id, category, amount, period, start_date, end_date, created_date, is_active";

pub fn create_budget(
    conn: &Connection,
    category: &str,
    amount: Decimal,
    period: Period,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO budgets(category, amount, period, start_date, end_date, created_date) \
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            category,
            amount.to_string(),
            period.as_str(),
            start_date,
            end_date,
            now_timestamp()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All budgets, or active ones only, newest creation first.
pub fn list_budgets(conn: &Connection, active_only: bool) -> Result<Vec<Budget>> {
    let sql = if active_only {
        format!(
            "SELECT {SELECT_COLS} FROM budgets WHERE is_active = 1 \
             ORDER BY created_date DESC, id DESC"
        )
    } else {
        format!("SELECT {SELECT_COLS} FROM budgets ORDER BY created_date DESC, id DESC")
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], Budget::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn get_budget(conn: &Connection, id: i64) -> Result<Budget> {
    let found = conn
        .query_row(
            &format!("SELECT {SELECT_COLS} FROM budgets WHERE id=?1"),
            params![id],
            Budget::from_row,
        )
        .optional()?;
    found.ok_or_else(|| LedgerError::NotFound(format!("Budget with ID {id} not found")))
}

/// Mutates amount, active flag, and end date only; every other field is
/// immutable post-creation.
pub fn update_budget(conn: &Connection, id: i64, fields: &BudgetUpdate) -> Result<Budget> {
    get_budget(conn, id)?;
    if fields.is_empty() {
        return Err(LedgerError::Validation(
            "No fields provided to update".into(),
        ));
    }
    conn.execute(
        "UPDATE budgets SET \
             amount = COALESCE(?2, amount), \
             is_active = COALESCE(?3, is_active), \
             end_date = COALESCE(?4, end_date) \
         WHERE id = ?1",
        params![
            id,
            fields.amount.map(|a| a.to_string()),
            fields.is_active,
            fields.end_date
        ],
    )?;
    get_budget(conn, id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    UnderBudget,
    NearLimit,
    OverBudget,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetHealth::UnderBudget => "under_budget",
            BudgetHealth::NearLimit => "near_limit",
            BudgetHealth::OverBudget => "over_budget",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetStatus {
    pub budget_id: i64,
    pub category: String,
    pub period: Period,
    pub budget_amount: Decimal,
    pub spent_amount: Decimal,
    pub remaining_amount: Decimal,
    pub percentage_used: Decimal,
    pub status: BudgetHealth,
}

/// Spend-vs-limit for every active budget over an explicit window. Each
/// budget is evaluated on its own even when several share a category.
pub fn budget_status(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<BudgetStatus>> {
    let budgets = list_budgets(conn, true)?;
    let mut out = Vec::with_capacity(budgets.len());
    for budget in budgets {
        let spent = category_spend(conn, &budget.category, start, end)?;
        let remaining = budget.amount - spent;
        let percentage = if budget.amount > Decimal::ZERO {
            spent / budget.amount * Decimal::from(100)
        } else {
            Decimal::ZERO
        };
        let status = if percentage >= Decimal::from(100) {
            BudgetHealth::OverBudget
        } else if percentage >= Decimal::from(80) {
            BudgetHealth::NearLimit
        } else {
            BudgetHealth::UnderBudget
        };
        out.push(BudgetStatus {
            budget_id: budget.id,
            category: budget.category,
            period: budget.period,
            budget_amount: budget.amount,
            spent_amount: spent,
            remaining_amount: remaining,
            percentage_used: percentage.round_dp(2),
            status,
        });
    }
    Ok(out)
}

fn category_spend(
    conn: &Connection,
    category: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT amount FROM expenses WHERE category = ?1 AND date BETWEEN ?2 AND ?3",
    )?;
    let rows = stmt.query_map(params![category, start, end], |r| decimal_column(r, 0))?;
    let mut total = Decimal::ZERO;
    for row in rows {
        total += row?;
    }
    Ok(total)
}
