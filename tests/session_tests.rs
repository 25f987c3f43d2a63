// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hisab::cli;
use hisab::commands;
use hisab::ledger::SavingsTarget;
use hisab::models::{CategorySets, Goal, Profile, Transaction, TransactionType};
use hisab::session::{ensure_active_profile, Session};
use hisab::storage::{
    CategoryRepository, GoalRepository, MemoryStore, ProfileRepository, TransactionRepository,
};
use rust_decimal::Decimal;
use std::cell::Cell;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

#[test]
fn first_run_seeds_a_default_profile() {
    let store = MemoryStore::new();
    let profile = ensure_active_profile(&store).unwrap();
    assert_eq!(profile.name, "Main");
    assert_eq!(store.active_profile().unwrap(), Some(profile.id.clone()));
    assert_eq!(store.profile_currency(&profile.id).unwrap(), "BDT");

    let cats = store.load_categories(&profile.id).unwrap().unwrap();
    assert!(cats.income.iter().any(|c| c == "Salary"));
    assert!(cats.savings.iter().any(|c| c == "General Savings"));

    // A second call resolves the same profile instead of creating another.
    let again = ensure_active_profile(&store).unwrap();
    assert_eq!(again.id, profile.id);
    assert_eq!(store.list_profiles().unwrap().len(), 1);
}

#[test]
fn dangling_active_marker_is_repointed() {
    let store = MemoryStore::new();
    let profile = ensure_active_profile(&store).unwrap();
    store.set_active_profile("no-such-id").unwrap();

    let resolved = ensure_active_profile(&store).unwrap();
    assert_eq!(resolved.id, profile.id);
    assert_eq!(store.active_profile().unwrap(), Some(profile.id));
}

#[test]
fn transaction_writes_land_in_the_store_and_advance_the_revision() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store).unwrap();
    let pid = session.profile.id.clone();
    assert_eq!(store.revision(&pid).unwrap(), 0);

    let tx = session
        .add_transaction(
            dec("1000"),
            "Salary",
            None,
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap();

    let stored = store.load_transactions(&pid).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, tx.id);
    assert_eq!(store.revision(&pid).unwrap(), 1);

    session.remove_transaction(&tx.id).unwrap();
    assert!(store.load_transactions(&pid).unwrap().is_empty());
    assert_eq!(store.revision(&pid).unwrap(), 2);
}

#[test]
fn deposit_persists_goals_and_the_synthetic_transaction() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store).unwrap();
    let pid = session.profile.id.clone();

    session
        .add_transaction(
            dec("1000"),
            "Salary",
            None,
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap();
    let gid = session
        .create_goal("Laptop", dec("500"), "Goal Saving", false)
        .unwrap();
    session
        .deposit(&SavingsTarget::Goal(gid.clone()), dec("100"), day(2))
        .unwrap();

    let goals = store.load_goals(&pid).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].saved_amount, dec("100"));

    let txs = store.load_transactions(&pid).unwrap();
    assert_eq!(txs.len(), 2);
    assert!(txs.iter().any(|t| t.r#type == TransactionType::Savings));
}

#[test]
fn set_currency_persists_and_re_denominates() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store).unwrap();
    let pid = session.profile.id.clone();

    let gid = session
        .create_goal("Laptop", dec("8500"), "Goal Saving", false)
        .unwrap();
    session.set_currency("USD").unwrap();

    assert_eq!(store.profile_currency(&pid).unwrap(), "USD");
    let goals = store.load_goals(&pid).unwrap();
    assert_eq!(goals[0].id, gid);
    assert_eq!(goals[0].currency, "USD");
    // 8500 BDT at 0.0085 USD per BDT.
    assert_eq!(goals[0].target_amount.round_dp(2), dec("72.25"));
}

#[test]
fn profiles_keep_separate_namespaces() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store).unwrap();
    session
        .add_transaction(
            dec("1000"),
            "Salary",
            None,
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap();
    session
        .create_goal("Laptop", dec("500"), "Goal Saving", false)
        .unwrap();

    let work = Profile {
        id: Uuid::new_v4().to_string(),
        name: "Work".to_string(),
    };
    store.create_profile(&work).unwrap();
    store.set_active_profile(&work.id).unwrap();

    let fresh = Session::open(&store).unwrap();
    assert_eq!(fresh.profile.id, work.id);
    assert!(fresh.ledger.transactions.is_empty());
    assert!(fresh.ledger.goals.is_empty());
    assert_eq!(fresh.ledger.currency, "BDT");
}

#[test]
fn stale_goal_writes_are_discarded() {
    let store = MemoryStore::new();
    let profile = ensure_active_profile(&store).unwrap();
    let goal = Goal {
        id: Uuid::new_v4().to_string(),
        name: "Current".to_string(),
        category: "Goal Saving".to_string(),
        currency: "BDT".to_string(),
        target_amount: dec("100"),
        saved_amount: dec("10"),
        is_fixed_deposit: false,
    };

    assert!(store.save_goals(&profile.id, &[goal.clone()], 5).unwrap());

    // A writer holding an older revision loses.
    let mut stale = goal.clone();
    stale.saved_amount = dec("999");
    assert!(!store.save_goals(&profile.id, &[stale], 3).unwrap());
    assert!(!store.commit_revision(&profile.id, 5).unwrap());

    let goals = store.load_goals(&profile.id).unwrap();
    assert_eq!(goals[0].saved_amount, dec("10"));
    assert_eq!(store.revision(&profile.id).unwrap(), 5);
}

#[test]
fn last_profile_cannot_be_deleted() {
    let store = MemoryStore::new();
    ensure_active_profile(&store).unwrap();

    let matches =
        cli::build_cli().get_matches_from(["hisab", "profile", "rm", "--name", "Main"]);
    let Some(("profile", sub)) = matches.subcommand() else {
        panic!("no profile subcommand");
    };
    let err = commands::profiles::handle(&store, sub).unwrap_err();
    assert!(err.to_string().contains("last remaining profile"));
    assert_eq!(store.list_profiles().unwrap().len(), 1);
}

#[test]
fn deleting_the_active_profile_reassigns_to_a_survivor() {
    let store = MemoryStore::new();
    let main = ensure_active_profile(&store).unwrap();

    let matches =
        cli::build_cli().get_matches_from(["hisab", "profile", "add", "--name", "Work"]);
    let Some(("profile", sub)) = matches.subcommand() else {
        panic!("no profile subcommand");
    };
    commands::profiles::handle(&store, sub).unwrap();
    let work_id = store
        .list_profiles()
        .unwrap()
        .into_iter()
        .find(|p| p.name == "Work")
        .unwrap()
        .id;
    assert_eq!(store.active_profile().unwrap(), Some(work_id));

    let matches =
        cli::build_cli().get_matches_from(["hisab", "profile", "rm", "--name", "Work"]);
    let Some(("profile", sub)) = matches.subcommand() else {
        panic!("no profile subcommand");
    };
    commands::profiles::handle(&store, sub).unwrap();

    assert_eq!(store.list_profiles().unwrap().len(), 1);
    assert_eq!(store.active_profile().unwrap(), Some(main.id));
}

#[test]
fn category_edits_enforce_uniqueness_and_persist() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store).unwrap();
    let pid = session.profile.id.clone();

    assert!(session
        .add_category(TransactionType::Expense, "Subscriptions")
        .unwrap());
    assert!(!session
        .add_category(TransactionType::Expense, "Subscriptions")
        .unwrap());
    assert!(session
        .remove_category(TransactionType::Expense, "Subscriptions")
        .unwrap());
    assert!(!session
        .remove_category(TransactionType::Expense, "Subscriptions")
        .unwrap());

    let cats = store.load_categories(&pid).unwrap().unwrap();
    assert!(!cats.expense.iter().any(|c| c == "Subscriptions"));
}

// A store whose transaction inserts can be made to fail, to observe the
// optimistic rollback from the outside.
struct FlakyStore {
    inner: MemoryStore,
    fail_inserts: Cell<bool>,
}

impl FlakyStore {
    fn new() -> Self {
        FlakyStore {
            inner: MemoryStore::new(),
            fail_inserts: Cell::new(false),
        }
    }
}

impl TransactionRepository for FlakyStore {
    fn load_transactions(&self, profile_id: &str) -> anyhow::Result<Vec<Transaction>> {
        self.inner.load_transactions(profile_id)
    }
    fn insert_transaction(&self, profile_id: &str, tx: &Transaction) -> anyhow::Result<()> {
        if self.fail_inserts.get() {
            anyhow::bail!("connection reset");
        }
        self.inner.insert_transaction(profile_id, tx)
    }
    fn update_transaction(&self, profile_id: &str, tx: &Transaction) -> anyhow::Result<()> {
        self.inner.update_transaction(profile_id, tx)
    }
    fn delete_transaction(&self, profile_id: &str, id: &str) -> anyhow::Result<bool> {
        self.inner.delete_transaction(profile_id, id)
    }
    fn replace_transactions(&self, profile_id: &str, txs: &[Transaction]) -> anyhow::Result<()> {
        self.inner.replace_transactions(profile_id, txs)
    }
}

impl GoalRepository for FlakyStore {
    fn load_goals(&self, profile_id: &str) -> anyhow::Result<Vec<Goal>> {
        self.inner.load_goals(profile_id)
    }
    fn save_goals(&self, profile_id: &str, goals: &[Goal], revision: i64) -> anyhow::Result<bool> {
        self.inner.save_goals(profile_id, goals, revision)
    }
}

impl CategoryRepository for FlakyStore {
    fn load_categories(&self, profile_id: &str) -> anyhow::Result<Option<CategorySets>> {
        self.inner.load_categories(profile_id)
    }
    fn save_categories(&self, profile_id: &str, categories: &CategorySets) -> anyhow::Result<()> {
        self.inner.save_categories(profile_id, categories)
    }
}

impl ProfileRepository for FlakyStore {
    fn list_profiles(&self) -> anyhow::Result<Vec<Profile>> {
        self.inner.list_profiles()
    }
    fn create_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.inner.create_profile(profile)
    }
    fn rename_profile(&self, id: &str, name: &str) -> anyhow::Result<()> {
        self.inner.rename_profile(id, name)
    }
    fn delete_profile(&self, id: &str) -> anyhow::Result<()> {
        self.inner.delete_profile(id)
    }
    fn active_profile(&self) -> anyhow::Result<Option<String>> {
        self.inner.active_profile()
    }
    fn set_active_profile(&self, id: &str) -> anyhow::Result<()> {
        self.inner.set_active_profile(id)
    }
    fn profile_currency(&self, id: &str) -> anyhow::Result<String> {
        self.inner.profile_currency(id)
    }
    fn set_profile_currency(&self, id: &str, currency: &str) -> anyhow::Result<()> {
        self.inner.set_profile_currency(id, currency)
    }
    fn revision(&self, id: &str) -> anyhow::Result<i64> {
        self.inner.revision(id)
    }
    fn commit_revision(&self, id: &str, revision: i64) -> anyhow::Result<bool> {
        self.inner.commit_revision(id, revision)
    }
}

#[test]
fn failed_transaction_write_rolls_the_ledger_back() {
    let flaky = FlakyStore::new();
    let mut session = Session::open(&flaky).unwrap();
    let pid = session.profile.id.clone();

    flaky.fail_inserts.set(true);
    let err = session
        .add_transaction(
            dec("1000"),
            "Salary",
            None,
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap_err();
    assert!(err.to_string().contains("rolled back"));
    assert!(session.ledger.transactions.is_empty());
    assert!(flaky.inner.load_transactions(&pid).unwrap().is_empty());
}

#[test]
fn failed_deposit_reverts_goal_counters() {
    let flaky = FlakyStore::new();
    let mut session = Session::open(&flaky).unwrap();

    session
        .add_transaction(
            dec("1000"),
            "Salary",
            None,
            TransactionType::Income,
            day(1),
            false,
        )
        .unwrap();
    let gid = session
        .create_goal("Laptop", dec("500"), "Goal Saving", false)
        .unwrap();

    flaky.fail_inserts.set(true);
    let err = session
        .deposit(&SavingsTarget::Goal(gid.clone()), dec("100"), day(2))
        .unwrap_err();
    assert!(err.to_string().contains("rolled back"));

    // Neither the goal counter nor the transaction list kept the change.
    assert_eq!(session.ledger.goal(&gid).unwrap().saved_amount, Decimal::ZERO);
    assert_eq!(session.ledger.transactions.len(), 1);
    assert_eq!(session.ledger.stats().unwrap().balance, dec("1000"));
}
