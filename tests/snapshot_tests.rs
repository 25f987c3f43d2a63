// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hisab::ledger::SavingsTarget;
use hisab::models::{Snapshot, TransactionType};
use hisab::session::Session;
use hisab::storage::{MemoryStore, TransactionRepository};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

fn populated_session(store: &MemoryStore) -> Session<&MemoryStore> {
    let mut session = Session::open(store).unwrap();
    session
        .add_transaction(
            dec("1000"),
            "Salary",
            Some("July".to_string()),
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap();
    session
        .add_transaction(
            dec("200"),
            "Food",
            None,
            TransactionType::Expense,
            day(2),
            false,
        )
        .unwrap();
    let gid = session
        .create_goal("Laptop", dec("500"), "Goal Saving", false)
        .unwrap();
    session
        .deposit(&SavingsTarget::Goal(gid), dec("100"), day(3))
        .unwrap();
    session
}

#[test]
fn snapshot_captures_the_whole_profile() {
    let store = MemoryStore::new();
    let session = populated_session(&store);

    let snap = session.snapshot();
    assert_eq!(snap.profile.name, "Main");
    assert_eq!(snap.currency, "BDT");
    assert_eq!(snap.transactions.len(), 3);
    assert_eq!(snap.goals.len(), 1);
    assert_eq!(snap.goals[0].saved_amount, dec("100"));
}

#[test]
fn snapshot_survives_a_json_file_round_trip() {
    let store = MemoryStore::new();
    let session = populated_session(&store);
    let snap = session.snapshot();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(&path, serde_json::to_string_pretty(&snap).unwrap()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: Snapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.currency, snap.currency);
    assert_eq!(parsed.transactions.len(), snap.transactions.len());
    assert_eq!(parsed.transactions[0].amount, snap.transactions[0].amount);
    assert_eq!(parsed.goals[0].target_amount, dec("500"));
    assert_eq!(parsed.categories.income, snap.categories.income);
}

#[test]
fn restore_replaces_the_active_profile_wholesale() {
    let source = MemoryStore::new();
    let snap = populated_session(&source).snapshot();

    let target = MemoryStore::new();
    let mut session = Session::open(&target).unwrap();
    session
        .add_transaction(
            dec("42"),
            "Old",
            None,
            TransactionType::Expense,
            day(10),
            false,
        )
        .unwrap();

    session.restore(&snap).unwrap();
    assert_eq!(session.ledger.transactions.len(), 3);
    assert!(session.ledger.transactions.iter().all(|t| t.category != "Old"));
    assert_eq!(session.ledger.goals.len(), 1);
    assert_eq!(session.ledger.currency, "BDT");
    assert_eq!(session.ledger.stats().unwrap().balance, dec("700"));

    // The replacement landed in the store, not only in memory.
    let pid = session.profile.id.clone();
    let stored = target.load_transactions(&pid).unwrap();
    assert_eq!(stored.len(), 3);
}

#[test]
fn restore_rejects_snapshots_with_unknown_currency() {
    let source = MemoryStore::new();
    let mut snap = populated_session(&source).snapshot();
    snap.currency = "XXX".to_string();

    let target = MemoryStore::new();
    let mut session = Session::open(&target).unwrap();
    session
        .add_transaction(
            dec("42"),
            "Keep",
            None,
            TransactionType::Expense,
            day(10),
            false,
        )
        .unwrap();

    let err = session.restore(&snap).unwrap_err();
    assert!(err.to_string().contains("unknown currency"));
    // Nothing was replaced.
    assert_eq!(session.ledger.transactions.len(), 1);
    assert_eq!(session.ledger.transactions[0].category, "Keep");
}
