//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! backends to be used interchangeably by the ledger.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Envelope;

/// An envelope that has not been persisted yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnvelope {
    pub name: String,
    pub budget: i64,
}

/// Trait defining the interface for envelope storage operations.
///
/// Implementations own id generation: `save` assigns envelope ids and
/// `next_expense_id` hands out expense ids. Mutating methods take
/// `&mut self`; the ledger serializes all mutations behind one lock, so
/// implementations hold no locks of their own.
#[async_trait]
pub trait EnvelopeStore: Send + Sync {
    /// Persist a new envelope and return it with its assigned id
    async fn save(&mut self, new_envelope: NewEnvelope) -> Result<Envelope>;

    /// Retrieve a specific envelope by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Envelope>>;

    /// Retrieve the envelope with exactly this name, if any
    async fn find_by_name(&self, name: &str) -> Result<Option<Envelope>>;

    /// List all envelopes ordered by id
    async fn find_all(&self) -> Result<Vec<Envelope>>;

    /// Replace the stored state of an envelope
    /// No-op when the id is unknown
    async fn update(&mut self, envelope: &Envelope) -> Result<()>;

    /// Persist both envelopes touched by a transfer as a single atomic write
    async fn update_both(&mut self, source: &Envelope, target: &Envelope) -> Result<()>;

    /// Delete an envelope together with its expense history
    /// No-op when the id is unknown
    async fn delete(&mut self, id: i64) -> Result<()>;

    /// Reserve and return the next expense id
    async fn next_expense_id(&mut self) -> Result<i64>;

    /// Check whether any envelope holds an expense imported under this Bank OK id
    async fn has_bank_expense(&self, bank_expense_id: i64) -> Result<bool>;
}
