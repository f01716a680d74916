//! HTTP client for the external Bank OK service.
//!
//! Bank OK exposes the expense feed consumed by the sync job and the
//! tax/discount lookups behind the subscription pricing endpoints. The
//! [`BankOkApi`] trait is the seam the services are written against, so
//! tests can substitute a canned feed.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankOkError {
    #[error("Bank OK request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Bank OK returned status {0}")]
    UnexpectedStatus(u16),
}

/// One record from the Bank OK expense feed.
///
/// `transaction_type` stays a plain string here; the sync job parses it and
/// skips records it cannot interpret instead of failing the whole feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankExpense {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub envelope_name: String,
    pub transaction_type: String,
}

#[derive(Debug, Deserialize)]
struct AmountResponse {
    amount: f64,
}

#[async_trait]
pub trait BankOkApi: Send + Sync {
    /// Fetch every expense currently known to Bank OK
    async fn fetch_expenses(&self) -> Result<Vec<BankExpense>, BankOkError>;

    /// Tax amount Bank OK charges on top of `price`
    async fn tax_amount(&self, price: f64) -> Result<f64, BankOkError>;

    /// Discount Bank OK grants subscribers on `price`
    async fn subscription_discount(&self, price: f64) -> Result<f64, BankOkError>;
}

/// Client that connects to a running Bank OK instance.
#[derive(Clone)]
pub struct BankOkClient {
    base_url: String,
    client: reqwest::Client,
}

impl BankOkClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn amount_for(&self, path: &str, price: f64) -> Result<f64, BankOkError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("price", price)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BankOkError::UnexpectedStatus(response.status().as_u16()));
        }
        let body: AmountResponse = response.json().await?;
        Ok(body.amount)
    }
}

#[async_trait]
impl BankOkApi for BankOkClient {
    async fn fetch_expenses(&self) -> Result<Vec<BankExpense>, BankOkError> {
        let response = self
            .client
            .get(format!("{}/api/expenses", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BankOkError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn tax_amount(&self, price: f64) -> Result<f64, BankOkError> {
        self.amount_for("/api/taxes/calculate", price).await
    }

    async fn subscription_discount(&self, price: f64) -> Result<f64, BankOkError> {
        self.amount_for("/api/discounts/subscription", price).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_feed_uses_camel_case_field_names() {
        let json = r#"
            [{
                "id": 9,
                "title": "Samsung 25",
                "price": 250,
                "envelopeName": "electronics",
                "transactionType": "WITHDRAW"
            }]
        "#;
        let expenses: Vec<BankExpense> = serde_json::from_str(json).unwrap();
        assert_eq!(
            expenses,
            vec![BankExpense {
                id: 9,
                title: "Samsung 25".to_string(),
                price: 250,
                envelope_name: "electronics".to_string(),
                transaction_type: "WITHDRAW".to_string(),
            }]
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BankOkClient::new("http://localhost:8081/");
        assert_eq!(client.base_url, "http://localhost:8081");
    }
}
