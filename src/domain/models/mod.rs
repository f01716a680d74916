pub mod envelope;
pub mod expense;

pub use envelope::Envelope;
pub use expense::{Expense, TransactionType};
