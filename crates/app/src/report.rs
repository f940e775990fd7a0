//! Derived report figures, recomputed on demand. Nothing here is cached
//! and nothing here mutates state.

use serde::Serialize;

use varejo_core::Money;
use varejo_inventory::Inventory;
use varejo_sales::SalesLog;

/// Aggregate shop figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopReport {
    /// Σ purchase_price × quantity over the *current* inventory.
    pub total_purchase_cost: Money,
    /// Σ unit_price × quantity over the sales log.
    pub total_sales_revenue: Money,
    /// Σ sale_price × quantity over the *current* inventory.
    pub inventory_value: Money,
    /// Revenue minus the current inventory's cost basis.
    ///
    /// This nets a log total against a snapshot total, so it is a gross
    /// margin approximation — not accounting profit, which would require a
    /// cost basis per sold unit that this system never tracks.
    pub gross_margin_approx: Money,
}

/// One bar of a per-product chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub product: String,
    pub value: i64,
}

fn clamped(total: i128) -> Money {
    Money::from_cents(total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

pub fn summarize(inventory: &Inventory, sales: &SalesLog) -> ShopReport {
    let total_purchase_cost = clamped(
        inventory
            .products()
            .iter()
            .map(|p| i128::from(p.purchase_price.cents()) * i128::from(p.quantity))
            .sum(),
    );
    let inventory_value = clamped(
        inventory
            .products()
            .iter()
            .map(|p| i128::from(p.sale_price.cents()) * i128::from(p.quantity))
            .sum(),
    );
    let total_sales_revenue = sales.total_revenue();

    ShopReport {
        total_purchase_cost,
        total_sales_revenue,
        inventory_value,
        gross_margin_approx: total_sales_revenue - total_purchase_cost,
    }
}

/// Units sold per product, sorted by product name.
pub fn units_sold_by_product(sales: &SalesLog) -> Vec<ChartRow> {
    sales
        .units_sold_by_product()
        .into_iter()
        .map(|(product, value)| ChartRow { product, value })
        .collect()
}

/// Current stock per product, in inventory order.
pub fn stock_by_product(inventory: &Inventory) -> Vec<ChartRow> {
    inventory
        .products()
        .iter()
        .map(|p| ChartRow {
            product: p.name.clone(),
            value: p.quantity,
        })
        .collect()
}
