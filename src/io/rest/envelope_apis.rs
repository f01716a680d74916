//! # REST API for Envelopes
//!
//! CRUD endpoints for envelopes plus expense recording and transfers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use super::dtos::{
    AddExpenseRequest, CreateEnvelopeRequest, TransferRequest, TransferResponse,
    UpdateEnvelopeRequest,
};
use super::{invalid_body_response, ledger_error_response};
use super::mappers::EnvelopeMapper;
use crate::bankok::BankOkApi;
use crate::storage::EnvelopeStore;
use crate::AppState;

// Query parameters for envelope listing
#[derive(Debug, Deserialize)]
pub struct EnvelopeListQuery {
    pub name: Option<String>,
}

/// List envelopes, filtered to an exact name when one is given
pub async fn list_envelopes<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    Query(query): Query<EnvelopeListQuery>,
) -> impl IntoResponse {
    info!("GET /api/envelopes - query: {:?}", query);

    let result = match query.name {
        Some(name) => state.envelope_service.find_all_by_name(&name).await,
        None => state.envelope_service.list_envelopes().await,
    };
    match result {
        Ok(envelopes) => {
            let body: Vec<_> = envelopes.into_iter().map(EnvelopeMapper::to_dto).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to list envelopes: {}", e);
            ledger_error_response(&e)
        }
    }
}

/// Create a new envelope
pub async fn create_envelope<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    payload: Result<Json<CreateEnvelopeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!("POST /api/envelopes - name: {:?}", request.name);

    match state
        .envelope_service
        .create_envelope(&request.name, request.budget)
        .await
    {
        Ok(envelope) => {
            (StatusCode::CREATED, Json(EnvelopeMapper::to_dto(envelope))).into_response()
        }
        Err(e) => {
            error!("Failed to create envelope: {}", e);
            ledger_error_response(&e)
        }
    }
}

/// Fetch a single envelope with its expense history
pub async fn get_envelope<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/envelopes/{}", id);

    match state.envelope_service.get_envelope(id).await {
        Ok(envelope) => (StatusCode::OK, Json(EnvelopeMapper::to_dto(envelope))).into_response(),
        Err(e) => {
            error!("Failed to fetch envelope {}: {}", id, e);
            ledger_error_response(&e)
        }
    }
}

/// Replace an envelope's name and budget
pub async fn update_envelope<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateEnvelopeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!("PUT /api/envelopes/{}", id);

    match state
        .envelope_service
        .update_envelope(id, &request.name, request.budget)
        .await
    {
        Ok(envelope) => (StatusCode::OK, Json(EnvelopeMapper::to_dto(envelope))).into_response(),
        Err(e) => {
            error!("Failed to update envelope {}: {}", id, e);
            ledger_error_response(&e)
        }
    }
}

/// Delete an envelope; deleting an unknown id still returns 204
pub async fn delete_envelope<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/envelopes/{}", id);

    match state.envelope_service.delete_envelope(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete envelope {}: {}", id, e);
            ledger_error_response(&e)
        }
    }
}

/// Record a withdrawal or deposit against an envelope
pub async fn add_expense<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    Path(id): Path<i64>,
    payload: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!("POST /api/envelopes/{}/expenses - amount: {}", id, request.amount);

    let transaction_type = EnvelopeMapper::to_domain_type(request.transaction_type);
    match state
        .envelope_service
        .add_expense(id, request.amount, &request.memo, transaction_type)
        .await
    {
        Ok(envelope) => {
            (StatusCode::CREATED, Json(EnvelopeMapper::to_dto(envelope))).into_response()
        }
        Err(e) => {
            error!("Failed to add expense to envelope {}: {}", id, e);
            ledger_error_response(&e)
        }
    }
}

/// Move an amount between two envelopes
pub async fn transfer<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!(
        "POST /api/envelopes/transfer - {} -> {}, amount: {}",
        request.source_envelope_id, request.target_envelope_id, request.amount
    );

    match state
        .envelope_service
        .transfer(
            request.source_envelope_id,
            request.target_envelope_id,
            request.amount,
            &request.memo,
        )
        .await
    {
        Ok(source) => {
            let body = TransferResponse {
                message: "Transfer successful".to_string(),
                source_envelope: EnvelopeMapper::to_dto(source),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Transfer failed: {}", e);
            ledger_error_response(&e)
        }
    }
}
