// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategorySets, Goal, Profile, Transaction};
use crate::storage::{
    CategoryRepository, GoalRepository, ProfileRepository, TransactionRepository,
};
use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory adapter: the guest-mode/test backend. Mirrors the SQLite
/// store's contract, including the revision guard on goal saves.
#[derive(Default)]
pub struct MemoryStore {
    inner: RefCell<Inner>,
}

#[derive(Default)]
struct Inner {
    profiles: Vec<Profile>,
    active: Option<String>,
    currencies: HashMap<String, String>,
    revisions: HashMap<String, i64>,
    transactions: HashMap<String, Vec<Transaction>>,
    goals: HashMap<String, Vec<Goal>>,
    categories: HashMap<String, CategorySets>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepository for MemoryStore {
    fn load_transactions(&self, profile_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .inner
            .borrow()
            .transactions
            .get(profile_id)
            .cloned()
            .unwrap_or_default())
    }

    fn insert_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        self.inner
            .borrow_mut()
            .transactions
            .entry(profile_id.to_string())
            .or_default()
            .insert(0, tx.clone());
        Ok(())
    }

    fn update_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if let Some(list) = inner.transactions.get_mut(profile_id) {
            if let Some(slot) = list.iter_mut().find(|t| t.id == tx.id) {
                *slot = tx.clone();
            }
        }
        Ok(())
    }

    fn delete_transaction(&self, profile_id: &str, id: &str) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        if let Some(list) = inner.transactions.get_mut(profile_id) {
            let before = list.len();
            list.retain(|t| t.id != id);
            return Ok(list.len() != before);
        }
        Ok(false)
    }

    fn replace_transactions(&self, profile_id: &str, txs: &[Transaction]) -> Result<()> {
        self.inner
            .borrow_mut()
            .transactions
            .insert(profile_id.to_string(), txs.to_vec());
        Ok(())
    }
}

impl GoalRepository for MemoryStore {
    fn load_goals(&self, profile_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .inner
            .borrow()
            .goals
            .get(profile_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_goals(&self, profile_id: &str, goals: &[Goal], revision: i64) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        let current = inner.revisions.get(profile_id).copied().unwrap_or(0);
        if revision <= current {
            return Ok(false);
        }
        inner.revisions.insert(profile_id.to_string(), revision);
        inner.goals.insert(profile_id.to_string(), goals.to_vec());
        Ok(true)
    }
}

impl CategoryRepository for MemoryStore {
    fn load_categories(&self, profile_id: &str) -> Result<Option<CategorySets>> {
        Ok(self.inner.borrow().categories.get(profile_id).cloned())
    }

    fn save_categories(&self, profile_id: &str, categories: &CategorySets) -> Result<()> {
        self.inner
            .borrow_mut()
            .categories
            .insert(profile_id.to_string(), categories.clone());
        Ok(())
    }
}

impl ProfileRepository for MemoryStore {
    fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.inner.borrow().profiles.clone())
    }

    fn create_profile(&self, profile: &Profile) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.profiles.iter().any(|p| p.name == profile.name) {
            bail!("Profile '{}' already exists", profile.name);
        }
        inner.profiles.push(profile.clone());
        Ok(())
    }

    fn rename_profile(&self, id: &str, name: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if let Some(p) = inner.profiles.iter_mut().find(|p| p.id == id) {
            p.name = name.to_string();
        }
        Ok(())
    }

    fn delete_profile(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.profiles.retain(|p| p.id != id);
        inner.transactions.remove(id);
        inner.goals.remove(id);
        inner.categories.remove(id);
        inner.currencies.remove(id);
        inner.revisions.remove(id);
        if inner.active.as_deref() == Some(id) {
            inner.active = None;
        }
        Ok(())
    }

    fn active_profile(&self) -> Result<Option<String>> {
        Ok(self.inner.borrow().active.clone())
    }

    fn set_active_profile(&self, id: &str) -> Result<()> {
        self.inner.borrow_mut().active = Some(id.to_string());
        Ok(())
    }

    fn profile_currency(&self, id: &str) -> Result<String> {
        Ok(self
            .inner
            .borrow()
            .currencies
            .get(id)
            .cloned()
            .unwrap_or_else(|| "BDT".to_string()))
    }

    fn set_profile_currency(&self, id: &str, currency: &str) -> Result<()> {
        self.inner
            .borrow_mut()
            .currencies
            .insert(id.to_string(), currency.to_string());
        Ok(())
    }

    fn revision(&self, id: &str) -> Result<i64> {
        Ok(self.inner.borrow().revisions.get(id).copied().unwrap_or(0))
    }

    fn commit_revision(&self, id: &str, revision: i64) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        let current = inner.revisions.get(id).copied().unwrap_or(0);
        if revision <= current {
            return Ok(false);
        }
        inner.revisions.insert(id.to_string(), revision);
        Ok(true)
    }
}
