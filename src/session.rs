// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Binds the in-memory ledger of the active profile to a backing store.
//!
//! Every mutation is applied optimistically to the ledger first and then
//! persisted; if persistence fails the in-memory change is reverted and the
//! caller gets `Error::RemoteSync`. Each successful write advances the
//! profile's monotonic revision stamp so a stale writer is discarded instead
//! of clobbering newer state.

use crate::errors::Error;
use crate::fx;
use crate::ledger::{DepositReceipt, Ledger, SavingsTarget};
use crate::models::{CategorySets, Profile, Snapshot, Transaction, TransactionType};
use crate::storage::Store;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

pub struct Session<S: Store> {
    store: S,
    pub profile: Profile,
    pub ledger: Ledger,
    revision: i64,
}

/// Resolve the active profile, creating a default "Main" profile (with
/// seeded category lists) on first run, and repointing a dangling active
/// marker at a surviving profile.
pub fn ensure_active_profile<S: Store>(store: &S) -> Result<Profile> {
    let mut profiles = store.list_profiles()?;
    if profiles.is_empty() {
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            name: "Main".to_string(),
        };
        store.create_profile(&profile)?;
        store.save_categories(&profile.id, &CategorySets::defaults())?;
        store.set_active_profile(&profile.id)?;
        return Ok(profile);
    }
    if let Some(active) = store.active_profile()? {
        if let Some(p) = profiles.iter().find(|p| p.id == active) {
            return Ok(p.clone());
        }
    }
    let first = profiles.remove(0);
    store.set_active_profile(&first.id)?;
    Ok(first)
}

impl<S: Store> Session<S> {
    /// Load the active profile's namespace wholesale: transactions, goals,
    /// and category lists. Nothing is shared or merged across profiles.
    pub fn open(store: S) -> Result<Self> {
        let profile = ensure_active_profile(&store)?;
        let currency = store.profile_currency(&profile.id)?;
        let transactions = store.load_transactions(&profile.id)?;
        let goals = store.load_goals(&profile.id)?;
        let categories = store
            .load_categories(&profile.id)?
            .unwrap_or_else(CategorySets::defaults);
        let revision = store.revision(&profile.id)?;
        Ok(Session {
            store,
            profile,
            ledger: Ledger {
                currency,
                transactions,
                goals,
                categories,
            },
            revision,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn advance_revision(&mut self) -> Result<()> {
        self.revision += 1;
        let _applied = self.store.commit_revision(&self.profile.id, self.revision)?;
        Ok(())
    }

    fn save_goals(&mut self) -> Result<()> {
        self.revision += 1;
        let _applied = self
            .store
            .save_goals(&self.profile.id, &self.ledger.goals, self.revision)?;
        Ok(())
    }

    // ---- transactions ----

    pub fn add_transaction(
        &mut self,
        amount: Decimal,
        category: &str,
        note: Option<String>,
        ty: TransactionType,
        date: NaiveDate,
        exclude_from_balance: bool,
    ) -> Result<Transaction> {
        let backup = self.ledger.transactions.clone();
        let tx = self
            .ledger
            .add_transaction(amount, category, note, ty, date, exclude_from_balance)
            .clone();
        match self
            .store
            .insert_transaction(&self.profile.id, &tx)
            .and_then(|()| self.advance_revision())
        {
            Ok(()) => Ok(tx),
            Err(e) => {
                self.ledger.transactions = backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    pub fn update_transaction(
        &mut self,
        id: &str,
        amount: Decimal,
        category: &str,
        note: Option<String>,
        ty: TransactionType,
        date: NaiveDate,
        exclude_from_balance: bool,
    ) -> Result<Transaction> {
        let backup = self.ledger.transactions.clone();
        let tx = self
            .ledger
            .update_transaction(id, amount, category, note, ty, date, exclude_from_balance)?
            .clone();
        match self
            .store
            .update_transaction(&self.profile.id, &tx)
            .and_then(|()| self.advance_revision())
        {
            Ok(()) => Ok(tx),
            Err(e) => {
                self.ledger.transactions = backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction> {
        let backup = self.ledger.transactions.clone();
        let tx = self.ledger.remove_transaction(id)?;
        match self
            .store
            .delete_transaction(&self.profile.id, id)
            .and_then(|_| self.advance_revision())
        {
            Ok(()) => Ok(tx),
            Err(e) => {
                self.ledger.transactions = backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    // ---- goals ----

    fn with_goal_rollback<T>(
        &mut self,
        op: impl FnOnce(&mut Ledger) -> Result<T, Error>,
    ) -> Result<T> {
        let goals_backup = self.ledger.goals.clone();
        let tx_backup = self.ledger.transactions.clone();
        let out = op(&mut self.ledger)?;
        match self.persist_goal_state(&tx_backup) {
            Ok(()) => Ok(out),
            Err(e) => {
                self.ledger.goals = goals_backup;
                self.ledger.transactions = tx_backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    /// Persist goals plus any synthetic transactions the operation appended.
    fn persist_goal_state(&mut self, tx_backup: &[Transaction]) -> Result<()> {
        for tx in &self.ledger.transactions {
            if !tx_backup.iter().any(|t| t.id == tx.id) {
                self.store.insert_transaction(&self.profile.id, tx)?;
            }
        }
        self.revision += 1;
        let _applied = self
            .store
            .save_goals(&self.profile.id, &self.ledger.goals, self.revision)?;
        Ok(())
    }

    pub fn create_goal(
        &mut self,
        name: &str,
        target_amount: Decimal,
        category: &str,
        is_fixed_deposit: bool,
    ) -> Result<String> {
        self.with_goal_rollback(|ledger| {
            ledger
                .create_goal(name, target_amount, category, is_fixed_deposit)
                .map(|g| g.id.clone())
        })
    }

    pub fn update_goal(
        &mut self,
        id: &str,
        name: &str,
        target_amount: Decimal,
        category: &str,
        is_fixed_deposit: bool,
    ) -> Result<()> {
        self.with_goal_rollback(|ledger| {
            ledger
                .update_goal(id, name, target_amount, category, is_fixed_deposit)
                .map(|_| ())
        })
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<()> {
        self.with_goal_rollback(|ledger| ledger.delete_goal(id).map(|_| ()))
    }

    pub fn deposit(
        &mut self,
        target: &SavingsTarget,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<DepositReceipt> {
        self.with_goal_rollback(|ledger| ledger.deposit(target, amount, date))
    }

    pub fn withdraw(
        &mut self,
        target: &SavingsTarget,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction> {
        self.with_goal_rollback(|ledger| ledger.withdraw(target, amount, date))
    }

    // ---- display currency ----

    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        if code == self.ledger.currency {
            return Ok(());
        }
        let goals_backup = self.ledger.goals.clone();
        let currency_backup = self.ledger.currency.clone();
        self.ledger.set_currency(code)?;
        match self
            .store
            .set_profile_currency(&self.profile.id, code)
            .and_then(|()| self.save_goals())
        {
            Ok(()) => Ok(()),
            Err(e) => {
                self.ledger.goals = goals_backup;
                self.ledger.currency = currency_backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    // ---- categories ----

    pub fn add_category(&mut self, ty: TransactionType, name: &str) -> Result<bool> {
        if !self.ledger.categories.add(ty, name) {
            return Ok(false);
        }
        match self
            .store
            .save_categories(&self.profile.id, &self.ledger.categories)
        {
            Ok(()) => Ok(true),
            Err(e) => {
                let _removed = self.ledger.categories.remove(ty, name);
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    pub fn remove_category(&mut self, ty: TransactionType, name: &str) -> Result<bool> {
        let backup = self.ledger.categories.clone();
        if !self.ledger.categories.remove(ty, name) {
            return Ok(false);
        }
        match self
            .store
            .save_categories(&self.profile.id, &self.ledger.categories)
        {
            Ok(()) => Ok(true),
            Err(e) => {
                self.ledger.categories = backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    // ---- snapshots ----

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile.clone(),
            currency: self.ledger.currency.clone(),
            categories: self.ledger.categories.clone(),
            transactions: self.ledger.transactions.clone(),
            goals: self.ledger.goals.clone(),
        }
    }

    /// Restore a snapshot wholesale into the active profile.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        fx::require_known(&snapshot.currency)?;
        let backup = self.ledger.clone();
        self.ledger.currency = snapshot.currency.clone();
        self.ledger.transactions = snapshot.transactions.clone();
        self.ledger.goals = snapshot.goals.clone();
        self.ledger.categories = snapshot.categories.clone();
        match self.persist_restore() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.ledger = backup;
                Err(Error::RemoteSync(e.to_string()).into())
            }
        }
    }

    fn persist_restore(&mut self) -> Result<()> {
        self.store
            .replace_transactions(&self.profile.id, &self.ledger.transactions)?;
        self.store
            .set_profile_currency(&self.profile.id, &self.ledger.currency)?;
        self.store
            .save_categories(&self.profile.id, &self.ledger.categories)?;
        self.save_goals()
    }
}
