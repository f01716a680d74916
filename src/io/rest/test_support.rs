//! Helpers shared by the REST handler tests.

use async_trait::async_trait;
use axum::response::Response;

use crate::bankok::{BankExpense, BankOkApi, BankOkError};
use crate::storage::MemoryEnvelopeStore;
use crate::AppState;

/// Scriptable Bank OK double: serves a canned feed and fixed rates, or
/// plays dead when `available` is false.
#[derive(Clone)]
pub struct StubBank {
    pub expenses: Vec<BankExpense>,
    pub tax: f64,
    pub discount: f64,
    pub available: bool,
}

impl Default for StubBank {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            tax: 0.0,
            discount: 0.0,
            available: true,
        }
    }
}

#[async_trait]
impl BankOkApi for StubBank {
    async fn fetch_expenses(&self) -> Result<Vec<BankExpense>, BankOkError> {
        if !self.available {
            return Err(BankOkError::UnexpectedStatus(503));
        }
        Ok(self.expenses.clone())
    }

    async fn tax_amount(&self, _price: f64) -> Result<f64, BankOkError> {
        if !self.available {
            return Err(BankOkError::UnexpectedStatus(503));
        }
        Ok(self.tax)
    }

    async fn subscription_discount(&self, _price: f64) -> Result<f64, BankOkError> {
        if !self.available {
            return Err(BankOkError::UnexpectedStatus(503));
        }
        Ok(self.discount)
    }
}

pub fn setup_state() -> AppState<MemoryEnvelopeStore, StubBank> {
    setup_state_with_bank(StubBank::default())
}

pub fn setup_state_with_bank(bank: StubBank) -> AppState<MemoryEnvelopeStore, StubBank> {
    AppState::new(MemoryEnvelopeStore::new(), bank)
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
