//! Imports the Bank OK expense feed into envelopes.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::client::{BankOkApi, BankOkError};
use crate::domain::models::TransactionType;
use crate::domain::{BankImport, EnvelopeService, LedgerError};
use crate::storage::EnvelopeStore;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    BankOk(#[from] BankOkError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Tally of a single sync run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub imported: u32,
    pub already_imported: u32,
    pub unmatched: u32,
    pub invalid: u32,
}

pub struct SyncService<S: EnvelopeStore, B: BankOkApi> {
    envelopes: Arc<EnvelopeService<S>>,
    bank: B,
}

impl<S: EnvelopeStore, B: BankOkApi> SyncService<S, B> {
    pub fn new(envelopes: Arc<EnvelopeService<S>>, bank: B) -> Self {
        Self { envelopes, bank }
    }

    /// Pull the feed and import each record into the envelope named by the
    /// record. Every import is one serialized ledger mutation, so a long
    /// feed never blocks the API for its whole duration. Records that were
    /// imported before, name no known envelope, or fail validation are
    /// skipped; only feed and storage failures abort the run.
    pub async fn sync(&self) -> Result<SyncOutcome, SyncError> {
        let records = self.bank.fetch_expenses().await?;
        info!("Fetched {} expense records from Bank OK", records.len());

        let mut outcome = SyncOutcome::default();
        for record in records {
            let transaction_type = match TransactionType::parse(&record.transaction_type) {
                Some(transaction_type) => transaction_type,
                None => {
                    warn!(
                        "Skipping Bank OK expense {}: unknown transaction type '{}'",
                        record.id, record.transaction_type
                    );
                    outcome.invalid += 1;
                    continue;
                }
            };

            let imported = self
                .envelopes
                .import_bank_expense(
                    &record.envelope_name,
                    record.id,
                    record.price,
                    &record.title,
                    transaction_type,
                )
                .await;
            match imported {
                Ok(BankImport::Imported(_)) => outcome.imported += 1,
                Ok(BankImport::AlreadyImported) => outcome.already_imported += 1,
                Ok(BankImport::NoMatchingEnvelope) => {
                    warn!(
                        "Skipping Bank OK expense {}: no envelope named '{}'",
                        record.id, record.envelope_name
                    );
                    outcome.unmatched += 1;
                }
                Err(LedgerError::Validation(reason)) => {
                    warn!("Skipping Bank OK expense {}: {}", record.id, reason);
                    outcome.invalid += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(
            "Bank OK sync finished: {} imported, {} already imported, {} unmatched, {} invalid",
            outcome.imported, outcome.already_imported, outcome.unmatched, outcome.invalid
        );
        Ok(outcome)
    }
}
