//! Subscription pricing backed by Bank OK tax and discount lookups.

use tracing::info;

use super::client::{BankOkApi, BankOkError};

/// A priced subscription: the caller's price and the price after Bank OK's
/// adjustment. This is the one surface where amounts are fractional, because
/// Bank OK quotes fractional taxes and discounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub original_price: f64,
    pub final_price: f64,
}

pub struct SubscriptionService<B: BankOkApi> {
    bank: B,
}

impl<B: BankOkApi> SubscriptionService<B> {
    pub fn new(bank: B) -> Self {
        Self { bank }
    }

    /// Price with the Bank OK tax added on top.
    pub async fn calculate_tax(&self, price: f64) -> Result<PriceQuote, BankOkError> {
        let tax = self.bank.tax_amount(price).await?;
        let quote = PriceQuote {
            original_price: price,
            final_price: price + tax,
        };
        info!("Taxed subscription price {} to {}", price, quote.final_price);
        Ok(quote)
    }

    /// Price with the Bank OK subscriber discount taken off.
    pub async fn calculate_discount(&self, price: f64) -> Result<PriceQuote, BankOkError> {
        let discount = self.bank.subscription_discount(price).await?;
        let quote = PriceQuote {
            original_price: price,
            final_price: price - discount,
        };
        info!("Discounted subscription price {} to {}", price, quote.final_price);
        Ok(quote)
    }
}
