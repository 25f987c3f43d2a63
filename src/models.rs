// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned to savings transactions that fund the unallocated pool.
pub const GENERAL_SAVINGS_CATEGORY: &str = "General Savings";
/// Category assigned to every savings withdrawal, goal-bound or general.
pub const WITHDRAWAL_CATEGORY: &str = "Savings Withdrawal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
    Savings,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Savings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
            TransactionType::Savings => "SAVINGS",
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            "SAVINGS" => Ok(TransactionType::Savings),
            other => bail!(
                "Invalid transaction type '{}', expected income|expense|savings",
                other
            ),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    /// Signed; savings withdrawals are recorded as negative entries.
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    pub r#type: TransactionType,
    /// Currency the amount was denominated in at creation time. Never
    /// rewritten when the display currency changes.
    pub currency: String,
    /// Only meaningful for SAVINGS entries: counted in savings totals but
    /// not subtracted from the spendable balance.
    pub exclude_from_balance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub category: String,
    pub currency: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub is_fixed_deposit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

/// Derived dashboard view. Never persisted; recomputed from the transaction
/// list and display currency on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings: Decimal,
    pub balance: Decimal,
}

/// Per-profile category lists, one open string set per transaction type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySets {
    pub income: Vec<String>,
    pub expense: Vec<String>,
    pub savings: Vec<String>,
}

impl CategorySets {
    pub fn defaults() -> Self {
        let s = |v: &[&str]| v.iter().map(|c| c.to_string()).collect();
        CategorySets {
            income: s(&["Salary", "Business", "Freelance", "Investment", "Gift", "Other"]),
            expense: s(&[
                "Food",
                "Transport",
                "Rent",
                "Bills",
                "Shopping",
                "Health",
                "Education",
                "Entertainment",
                "Other",
            ]),
            savings: s(&[
                "Goal Saving",
                GENERAL_SAVINGS_CATEGORY,
                "Fixed Deposit",
                "Emergency Fund",
            ]),
        }
    }

    pub fn list(&self, ty: TransactionType) -> &[String] {
        match ty {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
            TransactionType::Savings => &self.savings,
        }
    }

    fn list_mut(&mut self, ty: TransactionType) -> &mut Vec<String> {
        match ty {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
            TransactionType::Savings => &mut self.savings,
        }
    }

    /// Returns false when the name is already present (uniqueness guard).
    pub fn add(&mut self, ty: TransactionType, name: &str) -> bool {
        let list = self.list_mut(ty);
        if list.iter().any(|c| c == name) {
            return false;
        }
        list.push(name.to_string());
        true
    }

    /// Returns false when no such category existed.
    pub fn remove(&mut self, ty: TransactionType, name: &str) -> bool {
        let list = self.list_mut(ty);
        let before = list.len();
        list.retain(|c| c != name);
        list.len() != before
    }
}

/// Full-collection backup of one profile, the unit of export/import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub profile: Profile,
    pub currency: String,
    pub categories: CategorySets,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
}
