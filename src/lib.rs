//! # Budget OK
//!
//! Envelope budgeting service. Money is planned into named envelopes, spent
//! and received as WITHDRAW/DEPOSIT expense records, and moved between
//! envelopes with all-or-nothing transfers. An external Bank OK service
//! feeds imported expenses and prices subscriptions.
//!
//! ## Architecture
//!
//! - **domain**: the envelope ledger and its invariants; every mutation is
//!   serialized behind one lock
//! - **storage**: the [`storage::EnvelopeStore`] seam with in-memory and
//!   SQLite backends
//! - **io**: REST handlers, wire DTOs, and the error-to-status mapping
//! - **bankok**: HTTP client for Bank OK plus the sync and pricing services

pub mod bankok;
pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use bankok::{BankOkApi, SubscriptionService, SyncService};
use domain::EnvelopeService;
use io::rest::{bankok_apis, envelope_apis, subscription_apis};
use storage::EnvelopeStore;

/// Main application state that holds all services
pub struct AppState<S: EnvelopeStore, B: BankOkApi> {
    pub envelope_service: Arc<EnvelopeService<S>>,
    pub sync_service: Arc<SyncService<S, B>>,
    pub subscription_service: Arc<SubscriptionService<B>>,
}

impl<S: EnvelopeStore, B: BankOkApi> Clone for AppState<S, B> {
    fn clone(&self) -> Self {
        Self {
            envelope_service: Arc::clone(&self.envelope_service),
            sync_service: Arc::clone(&self.sync_service),
            subscription_service: Arc::clone(&self.subscription_service),
        }
    }
}

impl<S: EnvelopeStore, B: BankOkApi + Clone> AppState<S, B> {
    /// Wire all services around one store and one Bank OK client.
    pub fn new(store: S, bank: B) -> Self {
        let envelope_service = Arc::new(EnvelopeService::new(store));
        let sync_service = Arc::new(SyncService::new(Arc::clone(&envelope_service), bank.clone()));
        let subscription_service = Arc::new(SubscriptionService::new(bank));
        Self {
            envelope_service,
            sync_service,
            subscription_service,
        }
    }
}

/// Create the Axum router with all routes configured
pub fn create_router<S, B>(app_state: AppState<S, B>) -> Router
where
    S: EnvelopeStore + 'static,
    B: BankOkApi + 'static,
{
    // CORS setup so a separately served frontend can make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/envelopes",
            get(envelope_apis::list_envelopes::<S, B>)
                .post(envelope_apis::create_envelope::<S, B>),
        )
        .route("/envelopes/transfer", post(envelope_apis::transfer::<S, B>))
        .route(
            "/envelopes/:id",
            get(envelope_apis::get_envelope::<S, B>)
                .put(envelope_apis::update_envelope::<S, B>)
                .delete(envelope_apis::delete_envelope::<S, B>),
        )
        .route(
            "/envelopes/:id/expenses",
            post(envelope_apis::add_expense::<S, B>),
        )
        .route(
            "/bankok/sync-bank-ok",
            post(bankok_apis::sync_bank_ok::<S, B>),
        )
        .route(
            "/subscription/calculate-tax",
            post(subscription_apis::calculate_tax::<S, B>),
        )
        .route(
            "/subscription/calculate-discount",
            post(subscription_apis::calculate_discount::<S, B>),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
