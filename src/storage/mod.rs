// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage abstraction for the ledger. The domain layer never talks to a
//! backend directly; it goes through these repository traits so the SQLite
//! store and the in-memory store are interchangeable.

use crate::models::{CategorySets, Goal, Profile, Transaction};
use anyhow::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait TransactionRepository {
    /// Transactions for one profile, most recent first.
    fn load_transactions(&self, profile_id: &str) -> Result<Vec<Transaction>>;
    fn insert_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()>;
    fn update_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()>;
    /// Returns true if the transaction existed.
    fn delete_transaction(&self, profile_id: &str, id: &str) -> Result<bool>;
    /// Full-collection overwrite, the unit of snapshot import.
    fn replace_transactions(&self, profile_id: &str, txs: &[Transaction]) -> Result<()>;
}

pub trait GoalRepository {
    fn load_goals(&self, profile_id: &str) -> Result<Vec<Goal>>;
    /// Full-collection overwrite guarded by the profile revision: the write
    /// only lands when `revision` is newer than the stored one, so a stale
    /// writer is discarded instead of clobbering newer state. Returns whether
    /// the write was applied.
    fn save_goals(&self, profile_id: &str, goals: &[Goal], revision: i64) -> Result<bool>;
}

pub trait CategoryRepository {
    /// None means the profile has never saved lists (caller seeds defaults).
    fn load_categories(&self, profile_id: &str) -> Result<Option<CategorySets>>;
    fn save_categories(&self, profile_id: &str, categories: &CategorySets) -> Result<()>;
}

pub trait ProfileRepository {
    fn list_profiles(&self) -> Result<Vec<Profile>>;
    fn create_profile(&self, profile: &Profile) -> Result<()>;
    fn rename_profile(&self, id: &str, name: &str) -> Result<()>;
    /// Deletes the profile and everything namespaced under it.
    fn delete_profile(&self, id: &str) -> Result<()>;
    fn active_profile(&self) -> Result<Option<String>>;
    fn set_active_profile(&self, id: &str) -> Result<()>;
    fn profile_currency(&self, id: &str) -> Result<String>;
    fn set_profile_currency(&self, id: &str, currency: &str) -> Result<()>;
    fn revision(&self, id: &str) -> Result<i64>;
    /// Advance the monotonic revision stamp. Returns false when the stamp is
    /// not newer than the stored one (stale write, dropped).
    fn commit_revision(&self, id: &str, revision: i64) -> Result<bool>;
}

/// Everything a session needs from a backend.
pub trait Store:
    TransactionRepository + GoalRepository + CategoryRepository + ProfileRepository
{
}

impl<T> Store for T where
    T: TransactionRepository + GoalRepository + CategoryRepository + ProfileRepository
{
}

// All methods take &self, so a shared reference is itself a store. Lets a
// caller keep the backend around after handing it to a command handler.

impl<T: TransactionRepository> TransactionRepository for &T {
    fn load_transactions(&self, profile_id: &str) -> Result<Vec<Transaction>> {
        (**self).load_transactions(profile_id)
    }
    fn insert_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        (**self).insert_transaction(profile_id, tx)
    }
    fn update_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        (**self).update_transaction(profile_id, tx)
    }
    fn delete_transaction(&self, profile_id: &str, id: &str) -> Result<bool> {
        (**self).delete_transaction(profile_id, id)
    }
    fn replace_transactions(&self, profile_id: &str, txs: &[Transaction]) -> Result<()> {
        (**self).replace_transactions(profile_id, txs)
    }
}

impl<T: GoalRepository> GoalRepository for &T {
    fn load_goals(&self, profile_id: &str) -> Result<Vec<Goal>> {
        (**self).load_goals(profile_id)
    }
    fn save_goals(&self, profile_id: &str, goals: &[Goal], revision: i64) -> Result<bool> {
        (**self).save_goals(profile_id, goals, revision)
    }
}

impl<T: CategoryRepository> CategoryRepository for &T {
    fn load_categories(&self, profile_id: &str) -> Result<Option<CategorySets>> {
        (**self).load_categories(profile_id)
    }
    fn save_categories(&self, profile_id: &str, categories: &CategorySets) -> Result<()> {
        (**self).save_categories(profile_id, categories)
    }
}

impl<T: ProfileRepository> ProfileRepository for &T {
    fn list_profiles(&self) -> Result<Vec<Profile>> {
        (**self).list_profiles()
    }
    fn create_profile(&self, profile: &Profile) -> Result<()> {
        (**self).create_profile(profile)
    }
    fn rename_profile(&self, id: &str, name: &str) -> Result<()> {
        (**self).rename_profile(id, name)
    }
    fn delete_profile(&self, id: &str) -> Result<()> {
        (**self).delete_profile(id)
    }
    fn active_profile(&self) -> Result<Option<String>> {
        (**self).active_profile()
    }
    fn set_active_profile(&self, id: &str) -> Result<()> {
        (**self).set_active_profile(id)
    }
    fn profile_currency(&self, id: &str) -> Result<String> {
        (**self).profile_currency(id)
    }
    fn set_profile_currency(&self, id: &str, currency: &str) -> Result<()> {
        (**self).set_profile_currency(id, currency)
    }
    fn revision(&self, id: &str) -> Result<i64> {
        (**self).revision(id)
    }
    fn commit_revision(&self, id: &str, revision: i64) -> Result<bool> {
        (**self).commit_revision(id, revision)
    }
}
