use serde::{Deserialize, Serialize};

use varejo_core::{Money, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clothing,
    PhoneAccessory,
}

/// A stocked item.
///
/// `funding_account` records which account paid for the purchase;
/// `photo` is an opaque path into the photo store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: i64,
    pub funding_account: String,
    pub photo: Option<String>,
}
