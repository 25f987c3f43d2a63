// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use crate::fx;
use crate::models::{
    CategorySets, DashboardStats, Goal, Transaction, TransactionType, GENERAL_SAVINGS_CATEGORY,
    WITHDRAWAL_CATEGORY,
};
use crate::stats::compute_stats;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Where a savings deposit or withdrawal lands: a named goal, or the
/// unallocated general pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsTarget {
    General,
    Goal(String),
}

/// Outcome of a deposit. `completed_goal` carries the goal name exactly once,
/// when the deposit crosses the target from below; deposits past 100% never
/// re-fire it.
#[derive(Debug, Clone)]
pub struct DepositReceipt {
    pub transaction: Transaction,
    pub completed_goal: Option<String>,
}

/// The in-memory state of one profile: its transactions, goals, category
/// lists, and display currency. All mutations validate first and only touch
/// state on success, so a caller holding a failed `Result` knows nothing
/// changed.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub currency: String,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub categories: CategorySets,
}

impl Ledger {
    pub fn new(currency: &str) -> Self {
        Ledger {
            currency: currency.to_string(),
            transactions: Vec::new(),
            goals: Vec::new(),
            categories: CategorySets::defaults(),
        }
    }

    pub fn stats(&self) -> Result<DashboardStats, Error> {
        compute_stats(&self.transactions, &self.currency)
    }

    /// Savings not assigned to any goal, in the display currency. Clamped at
    /// zero: conversion rounding on goals denominated in a different currency
    /// must never surface a negative pool.
    pub fn general_savings(&self) -> Result<Decimal, Error> {
        let total = self.stats()?.total_savings;
        let mut allocated = Decimal::ZERO;
        for g in &self.goals {
            allocated += fx::convert(g.saved_amount, &g.currency, &self.currency)?;
        }
        Ok(std::cmp::max(Decimal::ZERO, total - allocated))
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
    ) -> &Transaction {
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            date,
            amount,
            category: category.to_string(),
            note,
            r#type: ty,
            currency: self.currency.clone(),
            // The flag is only meaningful for savings entries.
            exclude_from_balance: ty == TransactionType::Savings && exclude_from_balance,
        };
        self.transactions.insert(0, tx);
        &self.transactions[0]
    }

    pub fn transaction(&self, id: &str) -> Result<&Transaction, Error> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))
    }

    /// Replace an existing transaction wholesale. The updated entry is
    /// re-denominated in the current display currency, matching how an edit
    /// form re-enters the amount.
    pub fn update_transaction(
        &mut self,
        id: &str,
        amount: Decimal,
        category: &str,
        note: Option<String>,
        ty: TransactionType,
        date: NaiveDate,
        exclude_from_balance: bool,
    ) -> Result<&Transaction, Error> {
        let currency = self.currency.clone();
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))?;
        tx.amount = amount;
        tx.category = category.to_string();
        tx.note = note;
        tx.r#type = ty;
        tx.date = date;
        tx.currency = currency;
        tx.exclude_from_balance = ty == TransactionType::Savings && exclude_from_balance;
        Ok(tx)
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction, Error> {
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))?;
        Ok(self.transactions.remove(idx))
    }

    // ---- goals ----

    pub fn goal(&self, id: &str) -> Result<&Goal, Error> {
        self.goals
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| Error::GoalNotFound(id.to_string()))
    }

    fn goal_mut(&mut self, id: &str) -> Result<&mut Goal, Error> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| Error::GoalNotFound(id.to_string()))
    }

    pub fn find_goal_by_name(&self, name: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.name == name)
    }

    pub fn create_goal(
        &mut self,
        name: &str,
        target_amount: Decimal,
        category: &str,
        is_fixed_deposit: bool,
    ) -> Result<&Goal, Error> {
        if target_amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(target_amount));
        }
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: category.to_string(),
            currency: self.currency.clone(),
            target_amount,
            saved_amount: Decimal::ZERO,
            is_fixed_deposit,
        };
        self.goals.push(goal);
        let idx = self.goals.len() - 1;
        Ok(&self.goals[idx])
    }

    /// Rename/retarget a goal. `saved_amount` is never touched here; it only
    /// moves through deposit and withdraw.
    pub fn update_goal(
        &mut self,
        id: &str,
        name: &str,
        target_amount: Decimal,
        category: &str,
        is_fixed_deposit: bool,
    ) -> Result<&Goal, Error> {
        if target_amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(target_amount));
        }
        let goal = self.goal_mut(id)?;
        goal.name = name.to_string();
        goal.target_amount = target_amount;
        goal.category = category.to_string();
        goal.is_fixed_deposit = is_fixed_deposit;
        self.goal(id)
    }

    /// Removes the goal record. Historical synthetic transactions stay in the
    /// ledger as an audit trail of the money moved.
    pub fn delete_goal(&mut self, id: &str) -> Result<Goal, Error> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::GoalNotFound(id.to_string()))?;
        Ok(self.goals.remove(idx))
    }

    // ---- deposits & withdrawals ----

    /// Deposit into a goal or the general pool. The amount is entered in the
    /// display currency; the goal's counter is credited in the goal's own
    /// currency, and one synthetic SAVINGS transaction keeps the aggregator
    /// consistent with the goal ledger.
    pub fn deposit(
        &mut self,
        target: &SavingsTarget,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<DepositReceipt, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(amount));
        }
        match target {
            SavingsTarget::General => {
                let tx = self.append_savings(
                    amount,
                    GENERAL_SAVINGS_CATEGORY,
                    "Deposit to General Savings".to_string(),
                    date,
                );
                Ok(DepositReceipt {
                    transaction: tx,
                    completed_goal: None,
                })
            }
            SavingsTarget::Goal(id) => {
                let currency = self.currency.clone();
                let goal = self.goal_mut(id)?;
                let credit = fx::convert(amount, &currency, &goal.currency)?;
                let was_below = goal.saved_amount < goal.target_amount;
                goal.saved_amount += credit;
                let completed = was_below && goal.saved_amount >= goal.target_amount;
                let name = goal.name.clone();
                let category = goal.category.clone();
                let tx = self.append_savings(amount, &category, format!("Deposit to: {name}"), date);
                Ok(DepositReceipt {
                    transaction: tx,
                    completed_goal: completed.then_some(name),
                })
            }
        }
    }

    /// Withdraw from a goal or the general pool. Fixed-deposit goals always
    /// refuse, regardless of available balance; the lock must be cleared via
    /// `update_goal` first — unlocking and withdrawing are never one step.
    pub fn withdraw(
        &mut self,
        target: &SavingsTarget,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(amount));
        }
        match target {
            SavingsTarget::General => {
                let available = self.general_savings()?;
                if amount > available {
                    return Err(Error::InsufficientFunds {
                        requested: amount,
                        available,
                    });
                }
                Ok(self.append_savings(
                    -amount,
                    WITHDRAWAL_CATEGORY,
                    "Withdrawal from General Savings".to_string(),
                    date,
                ))
            }
            SavingsTarget::Goal(id) => {
                let currency = self.currency.clone();
                let goal = self.goal_mut(id)?;
                if goal.is_fixed_deposit {
                    return Err(Error::FixedDepositLocked(goal.name.clone()));
                }
                let debit = fx::convert(amount, &currency, &goal.currency)?;
                if debit > goal.saved_amount {
                    return Err(Error::InsufficientFunds {
                        requested: debit,
                        available: goal.saved_amount,
                    });
                }
                goal.saved_amount -= debit;
                let name = goal.name.clone();
                Ok(self.append_savings(
                    -amount,
                    WITHDRAWAL_CATEGORY,
                    format!("Withdrawal from: {name}"),
                    date,
                ))
            }
        }
    }

    fn append_savings(
        &mut self,
        amount: Decimal,
        category: &str,
        note: String,
        date: NaiveDate,
    ) -> Transaction {
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            date,
            amount,
            category: category.to_string(),
            note: Some(note),
            r#type: TransactionType::Savings,
            currency: self.currency.clone(),
            exclude_from_balance: false,
        };
        self.transactions.insert(0, tx.clone());
        tx
    }

    // ---- display currency ----

    /// Switch the display currency. Goals are re-denominated in place, a
    /// one-time conversion of target and saved amounts; transactions keep
    /// their stored currency and are converted only for display. All-or
    /// -nothing: an unknown code leaves every goal untouched.
    pub fn set_currency(&mut self, new_currency: &str) -> Result<(), Error> {
        if new_currency == self.currency {
            return Ok(());
        }
        fx::require_known(new_currency)?;
        let mut converted = Vec::with_capacity(self.goals.len());
        for g in &self.goals {
            let mut goal = g.clone();
            goal.target_amount = fx::convert(g.target_amount, &g.currency, new_currency)?;
            goal.saved_amount = fx::convert(g.saved_amount, &g.currency, new_currency)?;
            goal.currency = new_currency.to_string();
            converted.push(goal);
        }
        self.goals = converted;
        self.currency = new_currency.to_string();
        Ok(())
    }
}
