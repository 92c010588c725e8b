// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlog::ledger;
use spendlog::models::GroupBy;
use spendlog::reports;

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

fn add(conn: &Connection, date: &str, amount: &str, category: &str) {
    ledger::insert(conn, d(date), dec(amount), category, "", "").unwrap();
}

#[test]
fn summarize_groups_by_category_largest_total_first() {
    let conn = setup();
    add(&conn, "2024-01-01", "10", "Food");
    add(&conn, "2024-01-02", "5", "Food");
    add(&conn, "2024-01-03", "40", "Travel");
    add(&conn, "2024-02-10", "99", "Travel"); // outside range

    let data = reports::summarize(&conn, d("2024-01-01"), d("2024-01-31"), None).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].category, "Travel");
    assert_eq!(data[0].total_amount, dec("40"));
    assert_eq!(data[0].count, 1);
    assert_eq!(data[1].category, "Food");
    assert_eq!(data[1].total_amount, dec("15"));
    assert_eq!(data[1].count, 2);
}

#[test]
fn summarize_can_filter_to_one_category() {
    let conn = setup();
    add(&conn, "2024-01-01", "10", "Food");
    add(&conn, "2024-01-03", "40", "Travel");
    let data =
        reports::summarize(&conn, d("2024-01-01"), d("2024-01-31"), Some("Food")).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].category, "Food");
}

#[test]
fn statistics_daily_average_divides_by_distinct_dates() {
    let conn = setup();
    add(&conn, "2024-05-10", "10", "Food");
    add(&conn, "2024-05-10", "20", "Food");
    add(&conn, "2024-05-10", "30", "Travel");

    let stats = reports::statistics(&conn, d("2024-05-01"), d("2024-05-31")).unwrap();
    let b = &stats.basic;
    assert_eq!(b.total_transactions, 3);
    assert_eq!(b.total_amount, dec("60"));
    assert_eq!(b.average_amount, dec("20"));
    assert_eq!(b.min_amount, dec("10"));
    assert_eq!(b.max_amount, dec("30"));
    // One distinct date, so the daily average equals the total.
    assert_eq!(b.daily_average, dec("60"));
}

#[test]
fn statistics_on_empty_range_are_all_zero() {
    let conn = setup();
    let stats = reports::statistics(&conn, d("2024-05-01"), d("2024-05-31")).unwrap();
    let b = &stats.basic;
    assert_eq!(b.total_transactions, 0);
    assert_eq!(b.total_amount, Decimal::ZERO);
    assert_eq!(b.average_amount, Decimal::ZERO);
    assert_eq!(b.daily_average, Decimal::ZERO);
    assert!(stats.category_breakdown.is_empty());
}

#[test]
fn top_expenses_orders_by_amount_with_ties_in_store_order() {
    let conn = setup();
    add(&conn, "2024-01-01", "5", "A");
    add(&conn, "2024-01-02", "50", "B");
    add(&conn, "2024-01-03", "50", "C");
    add(&conn, "2024-01-04", "7", "D");

    let top = reports::top_expenses(&conn, d("2024-01-01"), d("2024-01-31"), 3).unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].category, "B"); // inserted before C
    assert_eq!(top[1].category, "C");
    assert_eq!(top[2].category, "D");
}

#[test]
fn month_summary_reports_grand_total_and_per_category_average() {
    let conn = setup();
    add(&conn, "2024-03-01", "10", "Food");
    add(&conn, "2024-03-15", "30", "Food");
    add(&conn, "2024-03-31", "100", "Rent");
    add(&conn, "2024-04-01", "999", "Rent"); // next month

    let s = reports::month_summary(&conn, 2024, 3).unwrap();
    assert_eq!(s.total_amount, dec("140"));
    assert_eq!(s.total_transactions, 3);
    assert_eq!(s.categories.len(), 2);
    assert_eq!(s.categories[0].category, "Rent");
    let food = &s.categories[1];
    assert_eq!(food.total_amount, dec("40"));
    assert_eq!(food.transaction_count, 2);
    assert_eq!(food.avg_amount, dec("20"));
}

#[test]
fn december_summary_does_not_leak_into_next_year() {
    let conn = setup();
    add(&conn, "2024-12-31", "10", "Food");
    add(&conn, "2025-01-01", "20", "Food");
    let s = reports::month_summary(&conn, 2024, 12).unwrap();
    assert_eq!(s.total_amount, dec("10"));
}

#[test]
fn year_summary_buckets_only_months_with_data() {
    let conn = setup();
    add(&conn, "2024-01-05", "10", "Food");
    add(&conn, "2024-01-20", "5", "Food");
    add(&conn, "2024-11-02", "7", "Travel");
    add(&conn, "2023-06-01", "999", "Food"); // other year

    let rows = reports::year_summary(&conn, 2024).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, 1);
    assert_eq!(rows[0].month_name, "Jan");
    assert_eq!(rows[0].total_amount, dec("15"));
    assert_eq!(rows[0].transaction_count, 2);
    assert_eq!(rows[1].month, 11);
    assert_eq!(rows[1].month_name, "Nov");
}

#[test]
fn trend_by_day_and_month_buckets_ascending() {
    let conn = setup();
    add(&conn, "2024-01-10", "10", "Food");
    add(&conn, "2024-01-10", "20", "Food");
    add(&conn, "2024-02-01", "30", "Food");
    add(&conn, "2024-01-15", "999", "Travel"); // other category

    let days = reports::category_trend(&conn, "Food", d("2024-01-01"), d("2024-02-28"), GroupBy::Day)
        .unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].period, "2024-01-10");
    assert_eq!(days[0].total_amount, dec("30"));
    assert_eq!(days[0].transaction_count, 2);
    assert_eq!(days[0].avg_amount, dec("15"));
    assert_eq!(days[1].period, "2024-02-01");

    let months =
        reports::category_trend(&conn, "Food", d("2024-01-01"), d("2024-02-28"), GroupBy::Month)
            .unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].period, "2024-01");
    assert_eq!(months[1].period, "2024-02");
}

#[test]
fn trend_by_week_uses_week_of_year_keys() {
    let conn = setup();
    // 2024-01-01 is a Monday, so Jan 8 opens week 02.
    add(&conn, "2024-01-03", "10", "Food");
    add(&conn, "2024-01-10", "20", "Food");

    let weeks =
        reports::category_trend(&conn, "Food", d("2024-01-01"), d("2024-01-31"), GroupBy::Week)
            .unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].period, "2024-W01");
    assert_eq!(weeks[1].period, "2024-W02");
}
