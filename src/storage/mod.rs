//! # Storage Module
//!
//! Envelope persistence behind the [`EnvelopeStore`] trait: an in-memory
//! backend for running without a database and a SQLite backend for durable
//! state. The ledger serializes every mutation, so backends stay free of
//! interior locking.

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryEnvelopeStore;
pub use sqlite::SqliteEnvelopeStore;
pub use traits::{EnvelopeStore, NewEnvelope};
