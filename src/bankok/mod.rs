//! # Bank OK Module
//!
//! Integration with the external Bank OK service: the HTTP client, the
//! expense-feed sync into envelopes, and subscription pricing.

pub mod client;
pub mod subscription_service;
pub mod sync_service;

pub use client::{BankExpense, BankOkApi, BankOkClient, BankOkError};
pub use subscription_service::{PriceQuote, SubscriptionService};
pub use sync_service::{SyncError, SyncOutcome, SyncService};
