use chrono::{DateTime, Utc};

/// Direction of an expense relative to the envelope balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Withdraw,
    Deposit,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Withdraw => "WITHDRAW",
            TransactionType::Deposit => "DEPOSIT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "WITHDRAW" => Some(TransactionType::Withdraw),
            "DEPOSIT" => Some(TransactionType::Deposit),
            _ => None,
        }
    }
}

/// A single ledger entry against an envelope.
///
/// `bank_expense_id` is set only on records imported from the Bank OK feed
/// and is what makes re-imports detectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub envelope_id: i64,
    pub amount: i64,
    pub memo: String,
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
    pub bank_expense_id: Option<i64>,
}

impl Expense {
    pub fn new(
        id: i64,
        envelope_id: i64,
        amount: i64,
        memo: impl Into<String>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id,
            envelope_id,
            amount,
            memo: memo.into(),
            transaction_type,
            date: Utc::now(),
            bank_expense_id: None,
        }
    }
}
