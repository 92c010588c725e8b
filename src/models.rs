// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

impl Expense {
    /// Column order: id, date, amount, category, subcategory, note.
    pub(crate) fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Expense {
            id: r.get(0)?,
            date: r.get(1)?,
            amount: decimal_column(r, 2)?,
            category: r.get(3)?,
            subcategory: r.get(4)?,
            note: r.get(5)?,
        })
    }
}

/// Raw, not-yet-validated expense fields for bulk ingestion. Date and
/// amount stay strings so each row can fail parsing independently.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseDraft {
    pub date: String,
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

/// One optional slot per mutable expense field; consumed by a fixed
/// UPDATE statement rather than a dynamically assembled one.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.note.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_date: String,
    pub is_active: bool,
}

impl Budget {
    /// Column order: id, category, amount, period, start_date, end_date,
    /// created_date, is_active.
    pub(crate) fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Budget {
            id: r.get(0)?,
            category: r.get(1)?,
            amount: decimal_column(r, 2)?,
            period: enum_column(r, 3)?,
            start_date: r.get(4)?,
            end_date: r.get(5)?,
            created_date: r.get(6)?,
            is_active: r.get(7)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub amount: Option<Decimal>,
    pub is_active: Option<bool>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.is_active.is_none() && self.end_date.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: String,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub is_active: bool,
    pub created_date: String,
    pub note: String,
}

impl RecurringExpense {
    /// Column order: id, name, amount, category, subcategory, frequency,
    /// next_due_date, is_active, created_date, note.
    pub(crate) fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(RecurringExpense {
            id: r.get(0)?,
            name: r.get(1)?,
            amount: decimal_column(r, 2)?,
            category: r.get(3)?,
            subcategory: r.get(4)?,
            frequency: enum_column(r, 5)?,
            next_due_date: r.get(6)?,
            is_active: r.get(7)?,
            created_date: r.get(8)?,
            note: r.get(9)?,
        })
    }
}

/// Budget period. Descriptive only: evaluation windows are always
/// caller-supplied, never derived from the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }
}

impl FromStr for Period {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, LedgerError> {
        match s {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(LedgerError::Validation(format!(
                "Unknown period '{other}' (use weekly|monthly|yearly)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, LedgerError> {
        match s {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(LedgerError::Validation(format!(
                "Unknown frequency '{other}' (use weekly|monthly|yearly)"
            ))),
        }
    }
}

/// Trend bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Week,
    Month,
}

impl FromStr for GroupBy {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, LedgerError> {
        match s {
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            other => Err(LedgerError::Validation(format!(
                "Unknown group-by '{other}' (use day|week|month)"
            ))),
        }
    }
}

pub(crate) fn decimal_column(r: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = r.get(idx)?;
    raw.parse().map_err(|e: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

fn enum_column<T>(r: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = LedgerError>,
{
    let raw: String = r.get(idx)?;
    raw.parse().map_err(|e: LedgerError| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}
