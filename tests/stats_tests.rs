// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hisab::errors::Error;
use hisab::models::{Transaction, TransactionType};
use hisab::stats::compute_stats;
use rust_decimal::Decimal;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(amount: &str, ty: TransactionType, currency: &str, exclude: bool) -> Transaction {
    Transaction {
        id: Uuid::new_v4().to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        amount: dec(amount),
        category: "Test".to_string(),
        note: None,
        r#type: ty,
        currency: currency.to_string(),
        exclude_from_balance: exclude,
    }
}

#[test]
fn balance_is_income_minus_expense_minus_deducted_savings() {
    let txs = vec![
        tx("1000", TransactionType::Income, "BDT", false),
        tx("200", TransactionType::Expense, "BDT", false),
        tx("100", TransactionType::Savings, "BDT", false),
    ];
    let s = compute_stats(&txs, "BDT").unwrap();
    assert_eq!(s.total_income, dec("1000"));
    assert_eq!(s.total_expense, dec("200"));
    assert_eq!(s.total_savings, dec("100"));
    assert_eq!(s.balance, dec("700"));
}

#[test]
fn empty_list_yields_zero_stats() {
    let s = compute_stats(&[], "USD").unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.total_savings, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
}

#[test]
fn excluded_savings_counts_in_savings_but_not_against_balance() {
    let txs = vec![
        tx("1000", TransactionType::Income, "BDT", false),
        tx("100", TransactionType::Savings, "BDT", true),
    ];
    let s = compute_stats(&txs, "BDT").unwrap();
    assert_eq!(s.total_savings, dec("100"));
    assert_eq!(s.balance, dec("1000"));
}

#[test]
fn negative_savings_entries_release_funds_back_to_balance() {
    // A withdrawal is a negative savings entry.
    let txs = vec![
        tx("1000", TransactionType::Income, "BDT", false),
        tx("100", TransactionType::Savings, "BDT", false),
        tx("-40", TransactionType::Savings, "BDT", false),
    ];
    let s = compute_stats(&txs, "BDT").unwrap();
    assert_eq!(s.total_savings, dec("60"));
    assert_eq!(s.balance, dec("940"));
}

#[test]
fn stats_are_order_independent() {
    let mut txs = vec![
        tx("1000", TransactionType::Income, "BDT", false),
        tx("200", TransactionType::Expense, "BDT", false),
        tx("100", TransactionType::Savings, "BDT", true),
        tx("-25", TransactionType::Savings, "BDT", false),
    ];
    let forward = compute_stats(&txs, "BDT").unwrap();
    txs.reverse();
    let backward = compute_stats(&txs, "BDT").unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn entries_are_converted_into_the_display_currency() {
    let txs = vec![
        tx("100", TransactionType::Income, "USD", false),
        tx("109", TransactionType::Income, "EUR", false),
    ];
    let s = compute_stats(&txs, "USD").unwrap();
    // 109 EUR = 118.81 USD
    assert_eq!(s.total_income.round_dp(2), dec("218.81"));
}

#[test]
fn unknown_stored_currency_fails_the_fold() {
    let txs = vec![
        tx("100", TransactionType::Income, "USD", false),
        tx("50", TransactionType::Expense, "XXX", false),
    ];
    let err = compute_stats(&txs, "USD").unwrap_err();
    assert!(matches!(err, Error::UnknownCurrency(ref c) if c == "XXX"));
}
