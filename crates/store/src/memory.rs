use std::sync::RwLock;

use varejo_accounts::Account;
use varejo_installments::InstallmentAgreement;
use varejo_inventory::Product;
use varejo_sales::Sale;

use crate::RecordStore;
use crate::error::{StoreError, StoreResult};

/// In-memory record store.
///
/// Intended for tests/dev. Same full-rewrite semantics as the file-backed
/// store, without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
    products: RwLock<Vec<Product>>,
    sales: RwLock<Vec<Sale>>,
    installments: RwLock<Vec<InstallmentAgreement>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn load<T: Clone>(table: &RwLock<Vec<T>>) -> StoreResult<Vec<T>> {
        Ok(table.read().map_err(|_| StoreError::Poisoned)?.clone())
    }

    fn save<T: Clone>(table: &RwLock<Vec<T>>, rows: &[T]) -> StoreResult<()> {
        *table.write().map_err(|_| StoreError::Poisoned)? = rows.to_vec();
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn load_accounts(&self) -> StoreResult<Vec<Account>> {
        Self::load(&self.accounts)
    }

    fn save_accounts(&self, rows: &[Account]) -> StoreResult<()> {
        Self::save(&self.accounts, rows)
    }

    fn load_products(&self) -> StoreResult<Vec<Product>> {
        Self::load(&self.products)
    }

    fn save_products(&self, rows: &[Product]) -> StoreResult<()> {
        Self::save(&self.products, rows)
    }

    fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        Self::load(&self.sales)
    }

    fn save_sales(&self, rows: &[Sale]) -> StoreResult<()> {
        Self::save(&self.sales, rows)
    }

    fn load_installments(&self) -> StoreResult<Vec<InstallmentAgreement>> {
        Self::load(&self.installments)
    }

    fn save_installments(&self, rows: &[InstallmentAgreement]) -> StoreResult<()> {
        Self::save(&self.installments, rows)
    }
}
