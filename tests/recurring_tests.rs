// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use spendlog::error::LedgerError;
use spendlog::ledger;
use spendlog::models::Frequency;
use spendlog::recurring::{self, advance_due_date};

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

fn add(conn: &Connection, name: &str, frequency: Frequency, due: &str) -> i64 {
    recurring::add_recurring(
        conn,
        name,
        dec("15.99"),
        "Entertainment",
        "Streaming",
        frequency,
        d(due),
        "family plan",
    )
    .unwrap()
}

#[test]
fn weekly_advance_adds_seven_days() {
    assert_eq!(
        advance_due_date(d("2024-01-01"), Frequency::Weekly).unwrap(),
        d("2024-01-08")
    );
}

#[test]
fn monthly_advance_rolls_december_into_january() {
    assert_eq!(
        advance_due_date(d("2024-12-15"), Frequency::Monthly).unwrap(),
        d("2025-01-15")
    );
    assert_eq!(
        advance_due_date(d("2024-05-15"), Frequency::Monthly).unwrap(),
        d("2024-06-15")
    );
}

#[test]
fn monthly_advance_clamps_to_last_day_of_short_months() {
    assert_eq!(
        advance_due_date(d("2024-01-31"), Frequency::Monthly).unwrap(),
        d("2024-02-29")
    );
    assert_eq!(
        advance_due_date(d("2023-01-31"), Frequency::Monthly).unwrap(),
        d("2023-02-28")
    );
    assert_eq!(
        advance_due_date(d("2024-03-31"), Frequency::Monthly).unwrap(),
        d("2024-04-30")
    );
}

#[test]
fn yearly_advance_clamps_leap_day() {
    assert_eq!(
        advance_due_date(d("2024-02-29"), Frequency::Yearly).unwrap(),
        d("2025-02-28")
    );
    assert_eq!(
        advance_due_date(d("2024-07-04"), Frequency::Yearly).unwrap(),
        d("2025-07-04")
    );
}

#[test]
fn process_materializes_expense_and_advances_from_stored_due_date() {
    let mut conn = setup();
    let id = add(&conn, "Netflix", Frequency::Weekly, "2024-01-01");

    // Processing late: the expense lands on the processing date, but the
    // schedule advances from the stored due date.
    let outcome = recurring::process(&mut conn, id, d("2024-01-03")).unwrap();
    assert_eq!(outcome.next_due_date, d("2024-01-08"));
    assert_eq!(outcome.date, d("2024-01-03"));

    let e = ledger::get_by_id(&conn, outcome.expense_id).unwrap();
    assert_eq!(e.date, d("2024-01-03"));
    assert_eq!(e.amount, dec("15.99"));
    assert_eq!(e.category, "Entertainment");
    assert_eq!(e.subcategory, "Streaming");
    assert_eq!(e.note, "Recurring: Netflix - family plan");

    let defs = recurring::list_recurring(&conn, true).unwrap();
    assert_eq!(defs[0].next_due_date, d("2024-01-08"));
}

#[test]
fn process_twice_keeps_advancing() {
    let mut conn = setup();
    let id = add(&conn, "Rent", Frequency::Monthly, "2024-11-01");
    recurring::process(&mut conn, id, d("2024-11-01")).unwrap();
    let outcome = recurring::process(&mut conn, id, d("2024-12-01")).unwrap();
    assert_eq!(outcome.next_due_date, d("2025-01-01"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn process_unknown_id_is_not_found_and_writes_nothing() {
    let mut conn = setup();
    let err = recurring::process(&mut conn, 404, d("2024-01-01")).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn process_inactive_definition_is_not_found_and_leaves_both_tables_untouched() {
    let mut conn = setup();
    let id = add(&conn, "Gym", Frequency::Monthly, "2024-01-10");
    recurring::set_recurring_active(&conn, id, false).unwrap();

    let err = recurring::process(&mut conn, id, d("2024-01-10")).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
    let defs = recurring::list_recurring(&conn, false).unwrap();
    assert_eq!(defs[0].next_due_date, d("2024-01-10"));
}

#[test]
fn unrecognized_stored_frequency_fails_without_partial_writes() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO recurring_expenses(name, amount, category, subcategory, frequency, \
                                        next_due_date, created_date, note) \
         VALUES ('Odd', '9.99', 'Other', '', 'daily', '2024-01-01', '2024-01-01T00:00:00Z', '')",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let err = recurring::process(&mut conn, id, d("2024-01-01")).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
    let due: String = conn
        .query_row(
            "SELECT next_due_date FROM recurring_expenses WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(due, "2024-01-01");
}

#[test]
fn due_soon_window_is_inclusive_and_sorted() {
    let conn = setup();
    let today = d("2024-06-01");
    add(&conn, "Later", Frequency::Monthly, "2024-06-11"); // outside 7 days
    let at_cutoff = add(&conn, "Cutoff", Frequency::Monthly, "2024-06-08");
    let overdue = add(&conn, "Overdue", Frequency::Weekly, "2024-05-20");
    let inactive = add(&conn, "Paused", Frequency::Weekly, "2024-06-02");
    recurring::set_recurring_active(&conn, inactive, false).unwrap();

    let report = recurring::due_soon(&conn, today, 7).unwrap();
    assert_eq!(report.cutoff_date, d("2024-06-08"));
    let ids: Vec<i64> = report.due_expenses.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![overdue, at_cutoff]);
}

#[test]
fn list_recurring_orders_by_next_due_date() {
    let conn = setup();
    let b = add(&conn, "B", Frequency::Monthly, "2024-02-01");
    let a = add(&conn, "A", Frequency::Monthly, "2024-01-01");
    let list = recurring::list_recurring(&conn, true).unwrap();
    assert_eq!(list[0].id, a);
    assert_eq!(list[1].id, b);
}
