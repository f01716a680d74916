//! Wire types for the REST API.
//!
//! JSON uses camelCase field names and SCREAMING_SNAKE_CASE transaction
//! types; dates are RFC 3339 strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Withdraw,
    Deposit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: i64,
    pub envelope_id: i64,
    pub amount: i64,
    pub memo: String,
    pub transaction_type: TransactionType,
    pub date: String,
    pub bank_expense_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDto {
    pub id: i64,
    pub name: String,
    pub budget: i64,
    pub balance: i64,
    pub expenses: Vec<ExpenseDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvelopeRequest {
    pub name: String,
    pub budget: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnvelopeRequest {
    pub name: String,
    pub budget: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest {
    pub amount: i64,
    pub memo: String,
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_envelope_id: i64,
    pub target_envelope_id: i64,
    pub amount: i64,
    pub memo: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub message: String,
    pub source_envelope: EnvelopeDto,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PriceRequest {
    pub price: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteDto {
    pub original_price: f64,
    pub final_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_json_uses_camel_case_keys() {
        let envelope = EnvelopeDto {
            id: 1,
            name: "electronics".to_string(),
            budget: 500,
            balance: 250,
            expenses: vec![ExpenseDto {
                id: 3,
                envelope_id: 1,
                amount: 250,
                memo: "Samsung 25".to_string(),
                transaction_type: TransactionType::Withdraw,
                date: "2026-08-24T12:00:00+00:00".to_string(),
                bank_expense_id: Some(9),
            }],
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["balance"], 250);
        assert_eq!(json["expenses"][0]["envelopeId"], 1);
        assert_eq!(json["expenses"][0]["transactionType"], "WITHDRAW");
        assert_eq!(json["expenses"][0]["bankExpenseId"], 9);
    }

    #[test]
    fn unsynced_expense_serializes_a_null_bank_id() {
        let expense = ExpenseDto {
            id: 3,
            envelope_id: 1,
            amount: 10,
            memo: "manual".to_string(),
            transaction_type: TransactionType::Deposit,
            date: "2026-08-24T12:00:00+00:00".to_string(),
            bank_expense_id: None,
        };

        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"bankExpenseId\":null"));
        assert!(json.contains("\"transactionType\":\"DEPOSIT\""));
    }

    #[test]
    fn transfer_request_accepts_the_documented_payload() {
        let request: TransferRequest = serde_json::from_str(
            r#"{"sourceEnvelopeId":1,"targetEnvelopeId":2,"amount":200,"memo":"Transfer"}"#,
        )
        .unwrap();
        assert_eq!(request.source_envelope_id, 1);
        assert_eq!(request.target_envelope_id, 2);
        assert_eq!(request.amount, 200);
        assert_eq!(request.memo, "Transfer");
    }

    #[test]
    fn price_quote_serializes_camel_case_prices() {
        let quote = PriceQuoteDto {
            original_price: 100.0,
            final_price: 121.0,
        };
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["originalPrice"], 100.0);
        assert_eq!(json["finalPrice"], 121.0);
    }
}
