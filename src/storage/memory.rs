//! In-memory envelope store.
//!
//! Volatile backend used when no DATABASE_URL is configured, and by tests.
//! Plain data behind the ledger's lock; nothing here can fail.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{EnvelopeStore, NewEnvelope};
use crate::domain::models::Envelope;

#[derive(Debug, Default)]
pub struct MemoryEnvelopeStore {
    envelopes: BTreeMap<i64, Envelope>,
    next_envelope_id: i64,
    next_expense_id: i64,
}

impl MemoryEnvelopeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnvelopeStore for MemoryEnvelopeStore {
    async fn save(&mut self, new_envelope: NewEnvelope) -> Result<Envelope> {
        self.next_envelope_id += 1;
        let envelope = Envelope {
            id: self.next_envelope_id,
            name: new_envelope.name,
            budget: new_envelope.budget,
            expenses: Vec::new(),
        };
        self.envelopes.insert(envelope.id, envelope.clone());
        Ok(envelope)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Envelope>> {
        Ok(self.envelopes.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Envelope>> {
        Ok(self
            .envelopes
            .values()
            .find(|envelope| envelope.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Envelope>> {
        Ok(self.envelopes.values().cloned().collect())
    }

    async fn update(&mut self, envelope: &Envelope) -> Result<()> {
        if self.envelopes.contains_key(&envelope.id) {
            self.envelopes.insert(envelope.id, envelope.clone());
        }
        Ok(())
    }

    async fn update_both(&mut self, source: &Envelope, target: &Envelope) -> Result<()> {
        self.update(source).await?;
        self.update(target).await
    }

    async fn delete(&mut self, id: i64) -> Result<()> {
        self.envelopes.remove(&id);
        Ok(())
    }

    async fn next_expense_id(&mut self) -> Result<i64> {
        self.next_expense_id += 1;
        Ok(self.next_expense_id)
    }

    async fn has_bank_expense(&self, bank_expense_id: i64) -> Result<bool> {
        Ok(self
            .envelopes
            .values()
            .any(|envelope| envelope.has_bank_expense(bank_expense_id)))
    }
}
