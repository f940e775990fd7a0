//! Record store: persistence for the four flat tables (accounts, products,
//! sales, installments) plus the photo blob store.
//!
//! Tables are loaded fully into memory at session start and rewritten in
//! full after every mutation. An absent file is an empty table. A single
//! writer is assumed; concurrent writers get last-writer-wins semantics.

pub mod csv_store;
pub mod error;
pub mod memory;
pub mod photo;

use std::sync::Arc;

use varejo_accounts::Account;
use varejo_installments::InstallmentAgreement;
use varejo_inventory::Product;
use varejo_sales::Sale;

pub use csv_store::CsvStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use photo::PhotoStore;

/// Persistence seam for the four tables.
///
/// Implementations make no domain decisions: they load whole tables and
/// rewrite whole tables. Errors are infrastructure failures, never
/// business rejections.
pub trait RecordStore: Send + Sync {
    fn load_accounts(&self) -> StoreResult<Vec<Account>>;
    fn save_accounts(&self, rows: &[Account]) -> StoreResult<()>;

    fn load_products(&self) -> StoreResult<Vec<Product>>;
    fn save_products(&self, rows: &[Product]) -> StoreResult<()>;

    fn load_sales(&self) -> StoreResult<Vec<Sale>>;
    fn save_sales(&self, rows: &[Sale]) -> StoreResult<()>;

    fn load_installments(&self) -> StoreResult<Vec<InstallmentAgreement>>;
    fn save_installments(&self, rows: &[InstallmentAgreement]) -> StoreResult<()>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn load_accounts(&self) -> StoreResult<Vec<Account>> {
        (**self).load_accounts()
    }

    fn save_accounts(&self, rows: &[Account]) -> StoreResult<()> {
        (**self).save_accounts(rows)
    }

    fn load_products(&self) -> StoreResult<Vec<Product>> {
        (**self).load_products()
    }

    fn save_products(&self, rows: &[Product]) -> StoreResult<()> {
        (**self).save_products(rows)
    }

    fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        (**self).load_sales()
    }

    fn save_sales(&self, rows: &[Sale]) -> StoreResult<()> {
        (**self).save_sales(rows)
    }

    fn load_installments(&self) -> StoreResult<Vec<InstallmentAgreement>> {
        (**self).load_installments()
    }

    fn save_installments(&self, rows: &[InstallmentAgreement]) -> StoreResult<()> {
        (**self).save_installments(rows)
    }
}
