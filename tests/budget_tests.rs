// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlog::budgets::{self, BudgetHealth};
use spendlog::error::LedgerError;
use spendlog::ledger;
use spendlog::models::{BudgetUpdate, Period};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    spendlog::db::init_schema(&conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn spend(conn: &Connection, date: &str, amount: &str, category: &str) {
    ledger::insert(conn, d(date), dec(amount), category, "", "").unwrap();
}

fn budget(conn: &Connection, category: &str, amount: &str) -> i64 {
    budgets::create_budget(conn, category, dec(amount), Period::Monthly, d("2024-01-01"), None)
        .unwrap()
}

#[test]
fn status_thresholds_at_80_and_100_percent() {
    let conn = setup();
    budget(&conn, "Under", "100");
    budget(&conn, "Near", "100");
    budget(&conn, "Over", "100");
    spend(&conn, "2024-01-10", "79", "Under");
    spend(&conn, "2024-01-10", "80", "Near");
    spend(&conn, "2024-01-10", "100", "Over");

    let statuses = budgets::budget_status(&conn, d("2024-01-01"), d("2024-01-31")).unwrap();
    let by_cat = |c: &str| statuses.iter().find(|s| s.category == c).unwrap();

    let under = by_cat("Under");
    assert_eq!(under.status, BudgetHealth::UnderBudget);
    assert_eq!(under.percentage_used, dec("79"));
    assert_eq!(under.remaining_amount, dec("21"));

    let near = by_cat("Near");
    assert_eq!(near.status, BudgetHealth::NearLimit);
    assert_eq!(near.percentage_used, dec("80"));

    let over = by_cat("Over");
    assert_eq!(over.status, BudgetHealth::OverBudget);
    assert_eq!(over.percentage_used, dec("100"));
    assert_eq!(over.remaining_amount, Decimal::ZERO);
}

#[test]
fn zero_limit_budget_reports_zero_percent_not_a_division_error() {
    let conn = setup();
    budget(&conn, "Free", "0");
    let statuses = budgets::budget_status(&conn, d("2024-01-01"), d("2024-01-31")).unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].percentage_used, Decimal::ZERO);
    assert_eq!(statuses[0].status, BudgetHealth::UnderBudget);
}

#[test]
fn duplicate_category_budgets_are_evaluated_independently() {
    let conn = setup();
    let small = budget(&conn, "Fun", "50");
    let large = budget(&conn, "Fun", "200");
    spend(&conn, "2024-01-05", "60", "Fun");

    let statuses = budgets::budget_status(&conn, d("2024-01-01"), d("2024-01-31")).unwrap();
    assert_eq!(statuses.len(), 2);
    let small_status = statuses.iter().find(|s| s.budget_id == small).unwrap();
    let large_status = statuses.iter().find(|s| s.budget_id == large).unwrap();
    assert_eq!(small_status.status, BudgetHealth::OverBudget);
    assert_eq!(small_status.percentage_used, dec("120"));
    assert_eq!(large_status.status, BudgetHealth::UnderBudget);
    assert_eq!(large_status.percentage_used, dec("30"));
}

#[test]
fn spend_outside_the_window_does_not_count() {
    let conn = setup();
    budget(&conn, "Food", "100");
    spend(&conn, "2023-12-31", "500", "Food");
    spend(&conn, "2024-01-10", "10", "Food");

    let statuses = budgets::budget_status(&conn, d("2024-01-01"), d("2024-01-31")).unwrap();
    assert_eq!(statuses[0].spent_amount, dec("10"));
}

#[test]
fn deactivated_budgets_are_skipped_by_status_and_default_listing() {
    let conn = setup();
    let id = budget(&conn, "Food", "100");
    budget(&conn, "Travel", "100");
    budgets::update_budget(
        &conn,
        id,
        &BudgetUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .unwrap();

    let statuses = budgets::budget_status(&conn, d("2024-01-01"), d("2024-01-31")).unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].category, "Travel");

    assert_eq!(budgets::list_budgets(&conn, true).unwrap().len(), 1);
    assert_eq!(budgets::list_budgets(&conn, false).unwrap().len(), 2);
}

#[test]
fn update_budget_error_policy_matches_expense_update() {
    let conn = setup();
    assert!(matches!(
        budgets::update_budget(&conn, 42, &BudgetUpdate::default()),
        Err(LedgerError::NotFound(_))
    ));
    let id = budget(&conn, "Food", "100");
    assert!(matches!(
        budgets::update_budget(&conn, id, &BudgetUpdate::default()),
        Err(LedgerError::Validation(_))
    ));
    let updated = budgets::update_budget(
        &conn,
        id,
        &BudgetUpdate {
            amount: Some(dec("150")),
            end_date: Some(d("2024-06-30")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.amount, dec("150"));
    assert_eq!(updated.end_date, Some(d("2024-06-30")));
    assert!(updated.is_active);
}

#[test]
fn budgets_list_newest_first() {
    let conn = setup();
    let first = budget(&conn, "A", "10");
    let second = budget(&conn, "B", "10");
    let list = budgets::list_budgets(&conn, true).unwrap();
    assert_eq!(list[0].id, second);
    assert_eq!(list[1].id, first);
}
