//! SQLite envelope store.
//!
//! Schema is created on connect. Envelope updates rewrite the expense rows
//! for that envelope inside one transaction, and `update_both` commits both
//! sides of a transfer in a single transaction so a mid-write failure never
//! leaves half a transfer behind. Ids come from the `id_sequences` table so
//! they survive restarts.

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};

use super::traits::{EnvelopeStore, NewEnvelope};
use crate::domain::models::{Envelope, Expense, TransactionType};

pub struct SqliteEnvelopeStore {
    pool: SqlitePool,
}

impl SqliteEnvelopeStore {
    /// Open (creating if needed) the database at `url` and set up the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Connect to a uniquely named in-memory database for tests.
    #[cfg(test)]
    pub async fn connect_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let url = format!("sqlite:file:envelopes_{}?mode=memory&cache=shared", test_id);
        Self::connect(&url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS envelopes (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                budget INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                envelope_id INTEGER NOT NULL REFERENCES envelopes(id),
                amount INTEGER NOT NULL,
                memo TEXT NOT NULL,
                transaction_type TEXT NOT NULL,
                date TEXT NOT NULL,
                bank_expense_id INTEGER
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS id_sequences (
                name TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "INSERT OR IGNORE INTO id_sequences (name, value) VALUES ('envelopes', 0), ('expenses', 0)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn bump_sequence(tx: &mut Transaction<'_, Sqlite>, name: &str) -> Result<i64> {
        sqlx::query("UPDATE id_sequences SET value = value + 1 WHERE name = ?")
            .bind(name)
            .execute(&mut **tx)
            .await?;
        let row = sqlx::query("SELECT value FROM id_sequences WHERE name = ?")
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("value"))
    }

    /// Write an envelope and its expense rows. Returns false when the id is
    /// unknown, in which case nothing is written.
    async fn write_envelope(tx: &mut Transaction<'_, Sqlite>, envelope: &Envelope) -> Result<bool> {
        let updated = sqlx::query("UPDATE envelopes SET name = ?, budget = ? WHERE id = ?")
            .bind(&envelope.name)
            .bind(envelope.budget)
            .bind(envelope.id)
            .execute(&mut **tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM expenses WHERE envelope_id = ?")
            .bind(envelope.id)
            .execute(&mut **tx)
            .await?;
        for expense in &envelope.expenses {
            sqlx::query(
                r#"
                INSERT INTO expenses (id, envelope_id, amount, memo, transaction_type, date, bank_expense_id)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(expense.id)
            .bind(expense.envelope_id)
            .bind(expense.amount)
            .bind(&expense.memo)
            .bind(expense.transaction_type.as_str())
            .bind(expense.date.to_rfc3339())
            .bind(expense.bank_expense_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(true)
    }

    async fn load_expenses(&self, envelope_id: i64) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, envelope_id, amount, memo, transaction_type, date, bank_expense_id
            FROM expenses
            WHERE envelope_id = ?
            ORDER BY id
            "#,
        )
        .bind(envelope_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::expense_from_row).collect()
    }

    fn envelope_from_row(row: &SqliteRow) -> Envelope {
        Envelope {
            id: row.get("id"),
            name: row.get("name"),
            budget: row.get("budget"),
            expenses: Vec::new(),
        }
    }

    fn expense_from_row(row: &SqliteRow) -> Result<Expense> {
        let type_text: String = row.get("transaction_type");
        let transaction_type = TransactionType::parse(&type_text)
            .ok_or_else(|| anyhow!("unknown transaction type '{}' in expenses table", type_text))?;

        let date_text: String = row.get("date");
        let date = DateTime::parse_from_rfc3339(&date_text)
            .with_context(|| format!("invalid expense date '{}'", date_text))?
            .with_timezone(&Utc);

        Ok(Expense {
            id: row.get("id"),
            envelope_id: row.get("envelope_id"),
            amount: row.get("amount"),
            memo: row.get("memo"),
            transaction_type,
            date,
            bank_expense_id: row.get("bank_expense_id"),
        })
    }
}

#[async_trait]
impl EnvelopeStore for SqliteEnvelopeStore {
    async fn save(&mut self, new_envelope: NewEnvelope) -> Result<Envelope> {
        let mut tx = self.pool.begin().await?;
        let id = Self::bump_sequence(&mut tx, "envelopes").await?;
        sqlx::query("INSERT INTO envelopes (id, name, budget) VALUES (?, ?, ?)")
            .bind(id)
            .bind(&new_envelope.name)
            .bind(new_envelope.budget)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Envelope {
            id,
            name: new_envelope.name,
            budget: new_envelope.budget,
            expenses: Vec::new(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Envelope>> {
        let row = sqlx::query("SELECT id, name, budget FROM envelopes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let mut envelope = Self::envelope_from_row(&row);
                envelope.expenses = self.load_expenses(envelope.id).await?;
                Ok(Some(envelope))
            }
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Envelope>> {
        let row = sqlx::query("SELECT id, name, budget FROM envelopes WHERE name = ? ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let mut envelope = Self::envelope_from_row(&row);
                envelope.expenses = self.load_expenses(envelope.id).await?;
                Ok(Some(envelope))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Envelope>> {
        let rows = sqlx::query("SELECT id, name, budget FROM envelopes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut envelopes: Vec<Envelope> = rows.iter().map(Self::envelope_from_row).collect();

        let expense_rows = sqlx::query(
            r#"
            SELECT id, envelope_id, amount, memo, transaction_type, date, bank_expense_id
            FROM expenses
            ORDER BY envelope_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_envelope: BTreeMap<i64, Vec<Expense>> = BTreeMap::new();
        for row in &expense_rows {
            let expense = Self::expense_from_row(row)?;
            by_envelope.entry(expense.envelope_id).or_default().push(expense);
        }
        for envelope in &mut envelopes {
            if let Some(expenses) = by_envelope.remove(&envelope.id) {
                envelope.expenses = expenses;
            }
        }

        Ok(envelopes)
    }

    async fn update(&mut self, envelope: &Envelope) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        if Self::write_envelope(&mut tx, envelope).await? {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn update_both(&mut self, source: &Envelope, target: &Envelope) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::write_envelope(&mut tx, source).await?;
        Self::write_envelope(&mut tx, target).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&mut self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM expenses WHERE envelope_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM envelopes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn next_expense_id(&mut self) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let id = Self::bump_sequence(&mut tx, "expenses").await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn has_bank_expense(&self, bank_expense_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM expenses WHERE bank_expense_id = ? LIMIT 1")
            .bind(bank_expense_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> SqliteEnvelopeStore {
        SqliteEnvelopeStore::connect_test()
            .await
            .expect("test database should connect")
    }

    fn new_envelope(name: &str, budget: i64) -> NewEnvelope {
        NewEnvelope {
            name: name.to_string(),
            budget,
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let mut store = setup_store().await;
        let first = store.save(new_envelope("Groceries", 1000)).await.unwrap();
        let second = store.save(new_envelope("Rent", 1200)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn expenses_round_trip_with_dates_and_bank_ids() {
        let mut store = setup_store().await;
        let mut envelope = store.save(new_envelope("Electronics", 500)).await.unwrap();

        let expense_id = store.next_expense_id().await.unwrap();
        let mut imported = Expense::new(
            expense_id,
            envelope.id,
            250,
            "Samsung 25",
            TransactionType::Withdraw,
        );
        imported.bank_expense_id = Some(9);
        envelope.add_expense(imported);

        let manual_id = store.next_expense_id().await.unwrap();
        envelope.add_expense(Expense::new(
            manual_id,
            envelope.id,
            40,
            "cables",
            TransactionType::Deposit,
        ));
        store.update(&envelope).await.unwrap();

        let reloaded = store.find_by_id(envelope.id).await.unwrap().unwrap();
        assert_eq!(reloaded, envelope);
        assert_eq!(reloaded.balance(), 500 - 250 + 40);
        assert!(store.has_bank_expense(9).await.unwrap());
        assert!(!store.has_bank_expense(10).await.unwrap());
    }

    #[tokio::test]
    async fn find_by_name_loads_the_matching_envelope() {
        let mut store = setup_store().await;
        store.save(new_envelope("Groceries", 1000)).await.unwrap();
        let rent = store.save(new_envelope("Rent", 1200)).await.unwrap();

        let found = store.find_by_name("Rent").await.unwrap().unwrap();
        assert_eq!(found.id, rent.id);
        assert!(store.find_by_name("Missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_orders_by_id_and_groups_expenses() {
        let mut store = setup_store().await;
        let mut first = store.save(new_envelope("A", 100)).await.unwrap();
        let mut second = store.save(new_envelope("B", 200)).await.unwrap();

        let id_a = store.next_expense_id().await.unwrap();
        first.add_expense(Expense::new(id_a, first.id, 10, "a", TransactionType::Withdraw));
        let id_b = store.next_expense_id().await.unwrap();
        second.add_expense(Expense::new(id_b, second.id, 20, "b", TransactionType::Withdraw));
        store.update(&first).await.unwrap();
        store.update(&second).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].expenses.len(), 1);
        assert_eq!(all[1].expenses[0].memo, "b");
    }

    #[tokio::test]
    async fn update_for_unknown_id_writes_nothing() {
        let mut store = setup_store().await;
        let phantom = Envelope {
            id: 99,
            name: "Phantom".to_string(),
            budget: 10,
            expenses: vec![Expense::new(1, 99, 5, "ghost", TransactionType::Withdraw)],
        };
        store.update(&phantom).await.unwrap();

        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_both_persists_both_sides() {
        let mut store = setup_store().await;
        let mut source = store.save(new_envelope("A", 1000)).await.unwrap();
        let mut target = store.save(new_envelope("B", 500)).await.unwrap();

        let withdraw_id = store.next_expense_id().await.unwrap();
        source.add_expense(Expense::new(withdraw_id, source.id, 200, "move", TransactionType::Withdraw));
        let deposit_id = store.next_expense_id().await.unwrap();
        target.add_expense(Expense::new(deposit_id, target.id, 200, "move", TransactionType::Deposit));
        store.update_both(&source, &target).await.unwrap();

        assert_eq!(store.find_by_id(source.id).await.unwrap().unwrap().balance(), 800);
        assert_eq!(store.find_by_id(target.id).await.unwrap().unwrap().balance(), 700);
    }

    #[tokio::test]
    async fn delete_removes_the_expense_history_too() {
        let mut store = setup_store().await;
        let mut envelope = store.save(new_envelope("Groceries", 1000)).await.unwrap();
        let expense_id = store.next_expense_id().await.unwrap();
        let mut expense = Expense::new(expense_id, envelope.id, 10, "food", TransactionType::Withdraw);
        expense.bank_expense_id = Some(5);
        envelope.add_expense(expense);
        store.update(&envelope).await.unwrap();

        store.delete(envelope.id).await.unwrap();
        store.delete(envelope.id).await.unwrap();

        assert!(store.find_by_id(envelope.id).await.unwrap().is_none());
        assert!(!store.has_bank_expense(5).await.unwrap());
    }

    #[tokio::test]
    async fn sequences_continue_across_saves_and_deletes() {
        let mut store = setup_store().await;
        let envelope = store.save(new_envelope("A", 100)).await.unwrap();
        store.delete(envelope.id).await.unwrap();
        let next = store.save(new_envelope("B", 100)).await.unwrap();

        assert_eq!(next.id, envelope.id + 1);
    }
}
