// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategorySets, Goal, Profile, Transaction, TransactionType};
use crate::storage::{
    CategoryRepository, GoalRepository, ProfileRepository, TransactionRepository,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

/// SQLite-backed store. Decimal amounts are stored as TEXT to avoid float
/// round-tripping; dates as ISO `YYYY-MM-DD`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        SqliteStore { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn parse_amount(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in {}", s, what))
}

impl TransactionRepository for SqliteStore {
    fn load_transactions(&self, profile_id: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, note, type, currency, exclude_from_balance
             FROM transactions WHERE profile_id=?1
             ORDER BY date DESC, created_at DESC",
        )?;
        let mut rows = stmt.query(params![profile_id])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let amount_s: String = r.get(2)?;
            let type_s: String = r.get(5)?;
            out.push(Transaction {
                id: r.get(0)?,
                date: r.get::<_, NaiveDate>(1)?,
                amount: parse_amount(&amount_s, "transactions")?,
                category: r.get(3)?,
                note: r.get(4)?,
                r#type: TransactionType::parse(&type_s)?,
                currency: r.get(6)?,
                exclude_from_balance: r.get::<_, i64>(7)? != 0,
            });
        }
        Ok(out)
    }

    fn insert_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        self.conn.execute(
            "INSERT INTO transactions(id, profile_id, date, amount, category, note, type, currency, exclude_from_balance)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                tx.id,
                profile_id,
                tx.date.to_string(),
                tx.amount.to_string(),
                tx.category,
                tx.note,
                tx.r#type.as_str(),
                tx.currency,
                tx.exclude_from_balance as i64,
            ],
        )?;
        Ok(())
    }

    fn update_transaction(&self, profile_id: &str, tx: &Transaction) -> Result<()> {
        self.conn.execute(
            "UPDATE transactions
             SET date=?3, amount=?4, category=?5, note=?6, type=?7, currency=?8, exclude_from_balance=?9
             WHERE id=?1 AND profile_id=?2",
            params![
                tx.id,
                profile_id,
                tx.date.to_string(),
                tx.amount.to_string(),
                tx.category,
                tx.note,
                tx.r#type.as_str(),
                tx.currency,
                tx.exclude_from_balance as i64,
            ],
        )?;
        Ok(())
    }

    fn delete_transaction(&self, profile_id: &str, id: &str) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND profile_id=?2",
            params![id, profile_id],
        )?;
        Ok(n > 0)
    }

    fn replace_transactions(&self, profile_id: &str, txs: &[Transaction]) -> Result<()> {
        self.conn.execute(
            "DELETE FROM transactions WHERE profile_id=?1",
            params![profile_id],
        )?;
        for tx in txs {
            self.insert_transaction(profile_id, tx)?;
        }
        Ok(())
    }
}

impl GoalRepository for SqliteStore {
    fn load_goals(&self, profile_id: &str) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, currency, target_amount, saved_amount, is_fixed_deposit
             FROM goals WHERE profile_id=?1 ORDER BY created_at",
        )?;
        let mut rows = stmt.query(params![profile_id])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let target_s: String = r.get(4)?;
            let saved_s: String = r.get(5)?;
            out.push(Goal {
                id: r.get(0)?,
                name: r.get(1)?,
                category: r.get(2)?,
                currency: r.get(3)?,
                target_amount: parse_amount(&target_s, "goals")?,
                saved_amount: parse_amount(&saved_s, "goals")?,
                is_fixed_deposit: r.get::<_, i64>(6)? != 0,
            });
        }
        Ok(out)
    }

    fn save_goals(&self, profile_id: &str, goals: &[Goal], revision: i64) -> Result<bool> {
        if !self.commit_revision(profile_id, revision)? {
            // Stale writer: a newer revision already landed, drop the write.
            return Ok(false);
        }
        self.conn
            .execute("DELETE FROM goals WHERE profile_id=?1", params![profile_id])?;
        for g in goals {
            self.conn.execute(
                "INSERT INTO goals(id, profile_id, name, category, currency, target_amount, saved_amount, is_fixed_deposit)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    g.id,
                    profile_id,
                    g.name,
                    g.category,
                    g.currency,
                    g.target_amount.to_string(),
                    g.saved_amount.to_string(),
                    g.is_fixed_deposit as i64,
                ],
            )?;
        }
        Ok(true)
    }
}

impl CategoryRepository for SqliteStore {
    fn load_categories(&self, profile_id: &str) -> Result<Option<CategorySets>> {
        let mut stmt = self.conn.prepare(
            "SELECT kind, name FROM categories WHERE profile_id=?1 ORDER BY kind, position, id",
        )?;
        let mut rows = stmt.query(params![profile_id])?;
        let mut sets = CategorySets {
            income: Vec::new(),
            expense: Vec::new(),
            savings: Vec::new(),
        };
        let mut any = false;
        while let Some(r) = rows.next()? {
            any = true;
            let kind_s: String = r.get(0)?;
            let name: String = r.get(1)?;
            match TransactionType::parse(&kind_s)? {
                TransactionType::Income => sets.income.push(name),
                TransactionType::Expense => sets.expense.push(name),
                TransactionType::Savings => sets.savings.push(name),
            }
        }
        Ok(if any { Some(sets) } else { None })
    }

    fn save_categories(&self, profile_id: &str, categories: &CategorySets) -> Result<()> {
        self.conn.execute(
            "DELETE FROM categories WHERE profile_id=?1",
            params![profile_id],
        )?;
        for ty in TransactionType::ALL {
            for (pos, name) in categories.list(ty).iter().enumerate() {
                self.conn.execute(
                    "INSERT INTO categories(profile_id, kind, name, position) VALUES (?1, ?2, ?3, ?4)",
                    params![profile_id, ty.as_str(), name, pos as i64],
                )?;
            }
        }
        Ok(())
    }
}

impl ProfileRepository for SqliteStore {
    fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM profiles ORDER BY created_at")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(Profile {
                id: r.get(0)?,
                name: r.get(1)?,
            });
        }
        Ok(out)
    }

    fn create_profile(&self, profile: &Profile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO profiles(id, name) VALUES (?1, ?2)",
            params![profile.id, profile.name],
        )?;
        Ok(())
    }

    fn rename_profile(&self, id: &str, name: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE profiles SET name=?2 WHERE id=?1",
            params![id, name],
        )?;
        Ok(())
    }

    fn delete_profile(&self, id: &str) -> Result<()> {
        // FK cascade removes transactions, goals, and categories.
        self.conn
            .execute("DELETE FROM profiles WHERE id=?1", params![id])?;
        Ok(())
    }

    fn active_profile(&self) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key='active_profile'",
                [],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set_active_profile(&self, id: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES('active_profile', ?1)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![id],
        )?;
        Ok(())
    }

    fn profile_currency(&self, id: &str) -> Result<String> {
        self.conn
            .query_row(
                "SELECT currency FROM profiles WHERE id=?1",
                params![id],
                |r| r.get(0),
            )
            .with_context(|| format!("Profile '{}' not found", id))
    }

    fn set_profile_currency(&self, id: &str, currency: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE profiles SET currency=?2 WHERE id=?1",
            params![id, currency],
        )?;
        Ok(())
    }

    fn revision(&self, id: &str) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT revision FROM profiles WHERE id=?1",
                params![id],
                |r| r.get(0),
            )
            .with_context(|| format!("Profile '{}' not found", id))
    }

    fn commit_revision(&self, id: &str, revision: i64) -> Result<bool> {
        let n = self.conn.execute(
            "UPDATE profiles SET revision=?2 WHERE id=?1 AND revision<?2",
            params![id, revision],
        )?;
        Ok(n > 0)
    }
}
