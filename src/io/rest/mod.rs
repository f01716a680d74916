//! # REST API Interface Layer
//!
//! HTTP endpoints for the envelope ledger. This layer translates between
//! wire DTOs and domain types and maps errors onto status codes; it holds
//! no business logic of its own.

pub mod bankok_apis;
pub mod dtos;
pub mod envelope_apis;
pub mod mappers;
pub mod subscription_apis;

#[cfg(test)]
pub(crate) mod test_support;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::bankok::{BankOkError, SyncError};
use crate::domain::LedgerError;
use dtos::ErrorBody;

/// The single place ledger errors become HTTP responses.
pub(crate) fn ledger_error_response(err: &LedgerError) -> Response {
    let status = match err {
        LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
        LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
        LedgerError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
        LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// A Bank OK failure is the upstream's fault, not the caller's.
pub(crate) fn bank_error_response(err: &BankOkError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn sync_error_response(err: &SyncError) -> Response {
    match err {
        SyncError::BankOk(bank) => bank_error_response(bank),
        SyncError::Ledger(ledger) => ledger_error_response(ledger),
    }
}

/// 400 for request bodies the Json extractor cannot read, whatever the
/// extractor's own preference. Missing and wrong-typed fields count as
/// validation failures here.
pub(crate) fn invalid_body_response(rejection: &JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: rejection.body_text(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_ledger_error_maps_to_its_status() {
        let cases = [
            (LedgerError::validation("bad input"), StatusCode::BAD_REQUEST),
            (LedgerError::envelope_not_found(1), StatusCode::NOT_FOUND),
            (
                LedgerError::InsufficientBalance {
                    available: 1,
                    requested: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::Storage(anyhow::anyhow!("disk gone")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ledger_error_response(&err).status(), expected);
        }
    }

    #[tokio::test]
    async fn bank_failures_map_to_bad_gateway() {
        let err = BankOkError::UnexpectedStatus(500);
        assert_eq!(bank_error_response(&err).status(), StatusCode::BAD_GATEWAY);
    }
}
