//! Envelope ledger domain logic.
//!
//! All mutations run behind one write lock, so every read-then-write span is
//! serialized: two transfers cannot interleave their balance checks, and a
//! reader never observes one leg of a transfer without the other.

use tokio::sync::RwLock;
use tracing::info;

use super::errors::{LedgerError, LedgerResult};
use super::models::{Envelope, Expense, TransactionType};
use crate::storage::{EnvelopeStore, NewEnvelope};

/// Outcome of importing one Bank OK expense record.
#[derive(Debug, Clone, PartialEq)]
pub enum BankImport {
    Imported(Envelope),
    AlreadyImported,
    NoMatchingEnvelope,
}

pub struct EnvelopeService<S: EnvelopeStore> {
    store: RwLock<S>,
}

impl<S: EnvelopeStore> EnvelopeService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub async fn create_envelope(&self, name: &str, budget: i64) -> LedgerResult<Envelope> {
        validate_envelope_fields(name, budget)?;

        let mut store = self.store.write().await;
        let envelope = store
            .save(NewEnvelope {
                name: name.to_string(),
                budget,
            })
            .await?;
        info!("Created envelope {} '{}'", envelope.id, envelope.name);
        Ok(envelope)
    }

    pub async fn get_envelope(&self, id: i64) -> LedgerResult<Envelope> {
        let store = self.store.read().await;
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::envelope_not_found(id))
    }

    pub async fn find_by_name(&self, name: &str) -> LedgerResult<Option<Envelope>> {
        let store = self.store.read().await;
        Ok(store.find_by_name(name).await?)
    }

    /// Every envelope whose name equals `name` exactly, in id order.
    /// Names are not unique, so this can return more than one.
    pub async fn find_all_by_name(&self, name: &str) -> LedgerResult<Vec<Envelope>> {
        let store = self.store.read().await;
        let envelopes = store.find_all().await?;
        Ok(envelopes
            .into_iter()
            .filter(|envelope| envelope.name == name)
            .collect())
    }

    pub async fn list_envelopes(&self) -> LedgerResult<Vec<Envelope>> {
        let store = self.store.read().await;
        Ok(store.find_all().await?)
    }

    pub async fn update_envelope(&self, id: i64, name: &str, budget: i64) -> LedgerResult<Envelope> {
        validate_envelope_fields(name, budget)?;

        let mut store = self.store.write().await;
        let mut envelope = store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::envelope_not_found(id))?;
        envelope.name = name.to_string();
        envelope.budget = budget;
        store.update(&envelope).await?;
        info!("Updated envelope {}", id);
        Ok(envelope)
    }

    /// Delete an envelope and its expense history. Deleting an id that does
    /// not exist is not an error.
    pub async fn delete_envelope(&self, id: i64) -> LedgerResult<()> {
        let mut store = self.store.write().await;
        store.delete(id).await?;
        info!("Deleted envelope {}", id);
        Ok(())
    }

    pub async fn add_expense(
        &self,
        envelope_id: i64,
        amount: i64,
        memo: &str,
        transaction_type: TransactionType,
    ) -> LedgerResult<Envelope> {
        validate_amount(amount)?;

        let mut store = self.store.write().await;
        let mut envelope = store
            .find_by_id(envelope_id)
            .await?
            .ok_or_else(|| LedgerError::envelope_not_found(envelope_id))?;
        let expense_id = store.next_expense_id().await?;
        envelope.add_expense(Expense::new(
            expense_id,
            envelope_id,
            amount,
            memo,
            transaction_type,
        ));
        store.update(&envelope).await?;
        info!(
            "Recorded {} of {} on envelope {}",
            transaction_type.as_str(),
            amount,
            envelope_id
        );
        Ok(envelope)
    }

    /// Move `amount` from one envelope to another, recording a WITHDRAW on
    /// the source and a DEPOSIT on the target. Either both records are
    /// persisted or neither is. Returns the updated source envelope.
    pub async fn transfer(
        &self,
        source_id: i64,
        target_id: i64,
        amount: i64,
        memo: &str,
    ) -> LedgerResult<Envelope> {
        validate_amount(amount)?;

        let mut store = self.store.write().await;
        let mut source = store
            .find_by_id(source_id)
            .await?
            .ok_or_else(|| LedgerError::source_envelope_not_found(source_id))?;

        if source_id == target_id {
            // Both legs land on the one envelope; its balance is unchanged.
            let available = source.balance();
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    available,
                    requested: amount,
                });
            }
            let withdraw_id = store.next_expense_id().await?;
            source.add_expense(Expense::new(
                withdraw_id,
                source_id,
                amount,
                memo,
                TransactionType::Withdraw,
            ));
            let deposit_id = store.next_expense_id().await?;
            source.add_expense(Expense::new(
                deposit_id,
                source_id,
                amount,
                memo,
                TransactionType::Deposit,
            ));
            store.update(&source).await?;
            info!("Transferred {} within envelope {}", amount, source_id);
            return Ok(source);
        }

        let mut target = store
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| LedgerError::target_envelope_not_found(target_id))?;

        let available = source.balance();
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        let withdraw_id = store.next_expense_id().await?;
        source.add_expense(Expense::new(
            withdraw_id,
            source_id,
            amount,
            memo,
            TransactionType::Withdraw,
        ));
        let deposit_id = store.next_expense_id().await?;
        target.add_expense(Expense::new(
            deposit_id,
            target_id,
            amount,
            memo,
            TransactionType::Deposit,
        ));
        store.update_both(&source, &target).await?;
        info!(
            "Transferred {} from envelope {} to envelope {}",
            amount, source_id, target_id
        );
        Ok(source)
    }

    /// Import one record from the Bank OK feed into the envelope carrying
    /// the record's envelope name. Runs as a single serialized mutation;
    /// a record already imported under the same Bank OK id is skipped.
    pub async fn import_bank_expense(
        &self,
        envelope_name: &str,
        bank_expense_id: i64,
        amount: i64,
        memo: &str,
        transaction_type: TransactionType,
    ) -> LedgerResult<BankImport> {
        validate_amount(amount)?;

        let mut store = self.store.write().await;
        if store.has_bank_expense(bank_expense_id).await? {
            return Ok(BankImport::AlreadyImported);
        }
        let mut envelope = match store.find_by_name(envelope_name).await? {
            Some(envelope) => envelope,
            None => return Ok(BankImport::NoMatchingEnvelope),
        };

        let expense_id = store.next_expense_id().await?;
        let mut expense = Expense::new(
            expense_id,
            envelope.id,
            amount,
            memo,
            transaction_type,
        );
        expense.bank_expense_id = Some(bank_expense_id);
        envelope.add_expense(expense);
        store.update(&envelope).await?;
        info!(
            "Imported Bank OK expense {} into envelope {}",
            bank_expense_id, envelope.id
        );
        Ok(BankImport::Imported(envelope))
    }
}

fn validate_envelope_fields(name: &str, budget: i64) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::validation("Envelope name must not be empty"));
    }
    if budget < 0 {
        return Err(LedgerError::validation("Envelope budget must not be negative"));
    }
    Ok(())
}

fn validate_amount(amount: i64) -> LedgerResult<()> {
    if amount < 0 {
        return Err(LedgerError::validation("Amount must not be negative"));
    }
    Ok(())
}
