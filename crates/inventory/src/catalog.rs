use varejo_core::{DomainError, DomainResult, Money, ProductId};

use crate::product::{Category, Product};

/// Stock level below which a product is surfaced as an operational alert.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Fields a product edit may change; `None` leaves the field untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub quantity: Option<i64>,
    pub photo: Option<String>,
}

/// Inventory ledger: insertion-ordered products with unique names.
///
/// Names are unique at registration time. The persisted source of this
/// system allowed duplicate-name rows and resolved lookups to the first
/// match; that ambiguity is rejected here instead, and rows are keyed by
/// generated [`ProductId`]s with `name` kept as a search/display field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the inventory from persisted rows, preserving row order.
    pub fn from_rows(rows: Vec<Product>) -> Self {
        Self { products: rows }
    }

    /// All products in insertion order (the persistence order).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Validation shared by [`Inventory::add`] and callers that must know a
    /// registration would be accepted before funding the purchase.
    pub fn validate_new(&self, product: &Product) -> DomainResult<()> {
        let name = product.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if product.purchase_price.is_negative() || product.sale_price.is_negative() {
            return Err(DomainError::validation("prices cannot be negative"));
        }
        if product.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.find_by_name(name).is_some() {
            return Err(DomainError::duplicate_product(name));
        }
        Ok(())
    }

    pub fn add(&mut self, mut product: Product) -> DomainResult<&Product> {
        self.validate_new(&product)?;
        product.name = product.name.trim().to_string();
        self.products.push(product);
        let idx = self.products.len() - 1;
        Ok(&self.products[idx])
    }

    /// Apply a signed stock delta, never letting quantity go below zero.
    ///
    /// On any error the stored quantity is unchanged.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> DomainResult<()> {
        let product = self.get_mut(id).ok_or(DomainError::NotFound)?;
        let next = product
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("quantity out of range"))?;
        if next < 0 {
            return Err(DomainError::Negative);
        }
        product.quantity = next;
        Ok(())
    }

    /// Edit a product in place. Renames must not collide with another
    /// product; price and quantity edits are validated as at registration.
    ///
    /// Recorded sales are unaffected by edits: they copied the sale price
    /// at the moment of the sale.
    pub fn update(&mut self, id: ProductId, update: ProductUpdate) -> DomainResult<&Product> {
        let name = match &update.name {
            Some(raw) => {
                let name = raw.trim();
                if name.is_empty() {
                    return Err(DomainError::validation("product name cannot be empty"));
                }
                if self.products.iter().any(|p| p.id != id && p.name == name) {
                    return Err(DomainError::duplicate_product(name));
                }
                Some(name.to_string())
            }
            None => None,
        };
        if update.purchase_price.is_some_and(Money::is_negative)
            || update.sale_price.is_some_and(Money::is_negative)
        {
            return Err(DomainError::validation("prices cannot be negative"));
        }
        if update.quantity.is_some_and(|q| q < 0) {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        let product = self.get_mut(id).ok_or(DomainError::NotFound)?;
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(price) = update.purchase_price {
            product.purchase_price = price;
        }
        if let Some(price) = update.sale_price {
            product.sale_price = price;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(photo) = update.photo {
            product.photo = Some(photo);
        }
        Ok(&*product)
    }

    pub fn remove(&mut self, id: ProductId) -> DomainResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;
        Ok(self.products.remove(idx))
    }

    /// Products whose quantity is strictly below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity < threshold)
            .collect()
    }
}
