//! Error types for ledger operations.
//!
//! Display strings double as the messages returned to API clients, so the
//! wording here is part of the wire contract.

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Rejected input; nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// Entity lookup miss.
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Transfer would overdraw the source envelope.
    #[error("Insufficient balance in source envelope. Available: {available}, Requested: {requested}")]
    InsufficientBalance { available: i64, requested: i64 },

    /// Failure in the storage backend.
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn envelope_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Envelope",
            id,
        }
    }

    pub fn source_envelope_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Source envelope",
            id,
        }
    }

    pub fn target_envelope_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Target envelope",
            id,
        }
    }
}
