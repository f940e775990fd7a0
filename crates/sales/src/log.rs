use std::collections::BTreeMap;

use varejo_core::Money;

use crate::sale::Sale;

/// Append-only log of completed sales.
///
/// Rows are facts: there is no update or delete operation, and the log is
/// persisted in append order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SalesLog {
    sales: Vec<Sale>,
}

impl SalesLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from persisted rows, preserving row order.
    pub fn from_rows(rows: Vec<Sale>) -> Self {
        Self { sales: rows }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn append(&mut self, sale: Sale) -> &Sale {
        self.sales.push(sale);
        let idx = self.sales.len() - 1;
        &self.sales[idx]
    }

    /// Σ `unit_price × quantity` over the whole log.
    pub fn total_revenue(&self) -> Money {
        let total: i128 = self
            .sales
            .iter()
            .map(|s| i128::from(s.unit_price.cents()) * i128::from(s.quantity))
            .sum();
        Money::from_cents(total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Units sold per product name, sorted by name.
    pub fn units_sold_by_product(&self) -> BTreeMap<String, i64> {
        let mut totals = BTreeMap::new();
        for sale in &self.sales {
            *totals.entry(sale.product_name.clone()).or_insert(0) += sale.quantity;
        }
        totals
    }
}
