use serde::Deserialize;

use varejo_core::Money;
use varejo_inventory::{Category, ProductUpdate};
use varejo_sales::PaymentMethod;

// -------------------------
// Request DTOs
// -------------------------
//
// Monetary fields are integer centavos, matching the domain representation.

#[derive(Debug, Deserialize)]
pub struct RegisterAccountRequest {
    pub name: String,
    pub opening_balance: Money,
}

#[derive(Debug, Deserialize)]
pub struct RegisterProductRequest {
    pub name: String,
    pub category: Category,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: i64,
    pub funding_account: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub quantity: Option<i64>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(req: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: req.name,
            category: req.category,
            purchase_price: req.purchase_price,
            sale_price: req.sale_price,
            quantity: req.quantity,
            photo: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordSaleRequest {
    pub product_id: String,
    pub quantity: i64,
    pub customer: String,
    pub payment_method: PaymentMethod,
    #[serde(default = "default_installment_count")]
    pub installment_count: u32,
    pub receiving_account: String,
}

fn default_installment_count() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct RegisterInstallmentRequest {
    pub customer: String,
    pub product: String,
    pub amount: Money,
    pub term: u32,
    #[serde(default)]
    pub paid: bool,
}
