//! # Domain Module
//!
//! Core business logic for the envelope ledger.
//!
//! An envelope pairs a budget with its expense history; the balance is never
//! stored, it is always derived from that history. The ledger service owns
//! the single lock that serializes every read-then-write mutation, which is
//! the whole concurrency story of this crate.

pub mod envelope_service;
pub mod errors;
pub mod models;

pub use envelope_service::{BankImport, EnvelopeService};
pub use errors::{LedgerError, LedgerResult};
