//! # REST API for subscription pricing
//!
//! Tax and discount quotes computed against the Bank OK service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::dtos::{PriceQuoteDto, PriceRequest};
use super::{bank_error_response, invalid_body_response};
use crate::bankok::{BankOkApi, PriceQuote};
use crate::storage::EnvelopeStore;
use crate::AppState;

fn quote_to_dto(quote: PriceQuote) -> PriceQuoteDto {
    PriceQuoteDto {
        original_price: quote.original_price,
        final_price: quote.final_price,
    }
}

/// Price with the Bank OK tax added
pub async fn calculate_tax<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!("POST /api/subscription/calculate-tax - price: {}", request.price);

    match state.subscription_service.calculate_tax(request.price).await {
        Ok(quote) => (StatusCode::OK, Json(quote_to_dto(quote))).into_response(),
        Err(e) => {
            error!("Tax calculation failed: {}", e);
            bank_error_response(&e)
        }
    }
}

/// Price with the Bank OK subscriber discount applied
pub async fn calculate_discount<S: EnvelopeStore, B: BankOkApi>(
    State(state): State<AppState<S, B>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_body_response(&rejection),
    };
    info!(
        "POST /api/subscription/calculate-discount - price: {}",
        request.price
    );

    match state
        .subscription_service
        .calculate_discount(request.price)
        .await
    {
        Ok(quote) => (StatusCode::OK, Json(quote_to_dto(quote))).into_response(),
        Err(e) => {
            error!("Discount calculation failed: {}", e);
            bank_error_response(&e)
        }
    }
}
