//! # REST API for Bank OK sync
//!
//! One endpoint that pulls the Bank OK expense feed into envelopes.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::{error, info};

use super::sync_error_response;
use crate::bankok::BankOkApi;
use crate::storage::EnvelopeStore;
use crate::AppState;

/// Import all new Bank OK expenses into their envelopes
pub async fn sync_bank_ok<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
) -> impl IntoResponse {
    info!("POST /api/bankok/sync-bank-ok");

    match state.sync_service.sync().await {
        Ok(outcome) => {
            info!("Bank OK sync outcome: {:?}", outcome);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!("Bank OK sync failed: {}", e);
            sync_error_response(&e)
        }
    }
}
