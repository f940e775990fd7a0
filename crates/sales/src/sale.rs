use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use varejo_core::{Money, ProductId, SaleId};

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Pix,
    Cash,
    Installment,
}

/// An immutable record of a completed transfer of stock for payment.
///
/// `unit_price` is copied from the product at the moment of the sale;
/// later price edits never reach back into recorded sales. The
/// `installment_count` is recorded for every payment method but carries
/// financial meaning only when `payment_method` is
/// [`PaymentMethod::Installment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub customer: String,
    pub payment_method: PaymentMethod,
    pub installment_count: u32,
    pub receiving_account: String,
    pub recorded_at: DateTime<Utc>,
}

impl Sale {
    /// `unit_price × quantity`. Both factors were validated when the sale
    /// was recorded, so the product fits in an amount.
    pub fn total(&self) -> Money {
        Money::from_cents(self.unit_price.cents().saturating_mul(self.quantity))
    }
}
