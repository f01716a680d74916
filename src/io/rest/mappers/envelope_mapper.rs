use crate::domain::models::{
    Envelope as DomainEnvelope, Expense as DomainExpense,
    TransactionType as DomainTransactionType,
};
use crate::io::rest::dtos::{EnvelopeDto, ExpenseDto, TransactionType as WireTransactionType};

pub struct EnvelopeMapper;

impl EnvelopeMapper {
    pub fn to_dto(domain: DomainEnvelope) -> EnvelopeDto {
        let balance = domain.balance();
        EnvelopeDto {
            id: domain.id,
            name: domain.name,
            budget: domain.budget,
            balance,
            expenses: domain.expenses.into_iter().map(Self::expense_to_dto).collect(),
        }
    }

    pub fn expense_to_dto(domain: DomainExpense) -> ExpenseDto {
        ExpenseDto {
            id: domain.id,
            envelope_id: domain.envelope_id,
            amount: domain.amount,
            memo: domain.memo,
            transaction_type: Self::to_dto_type(domain.transaction_type),
            date: domain.date.to_rfc3339(),
            bank_expense_id: domain.bank_expense_id,
        }
    }

    pub fn to_dto_type(domain_type: DomainTransactionType) -> WireTransactionType {
        match domain_type {
            DomainTransactionType::Withdraw => WireTransactionType::Withdraw,
            DomainTransactionType::Deposit => WireTransactionType::Deposit,
        }
    }

    pub fn to_domain_type(wire_type: WireTransactionType) -> DomainTransactionType {
        match wire_type {
            WireTransactionType::Withdraw => DomainTransactionType::Withdraw,
            WireTransactionType::Deposit => DomainTransactionType::Deposit,
        }
    }
}
