use super::expense::{Expense, TransactionType};

/// A budget envelope and its full expense history.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub id: i64,
    pub name: String,
    pub budget: i64,
    pub expenses: Vec<Expense>,
}

impl Envelope {
    /// Balance derived from history: budget minus withdrawals plus deposits.
    pub fn balance(&self) -> i64 {
        self.expenses
            .iter()
            .fold(self.budget, |balance, expense| match expense.transaction_type {
                TransactionType::Withdraw => balance - expense.amount,
                TransactionType::Deposit => balance + expense.amount,
            })
    }

    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn has_bank_expense(&self, bank_expense_id: i64) -> bool {
        self.expenses
            .iter()
            .any(|expense| expense.bank_expense_id == Some(bank_expense_id))
    }
}
