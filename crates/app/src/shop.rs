use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use varejo_accounts::{Account, AccountLedger};
use varejo_core::{DomainError, InstallmentId, Money, ProductId, SaleId};
use varejo_installments::{InstallmentAgreement, InstallmentBook};
use varejo_inventory::{Category, Inventory, LOW_STOCK_THRESHOLD, Product, ProductUpdate};
use varejo_sales::{PaymentMethod, Sale, SalesLog};
use varejo_store::{PhotoStore, RecordStore};

use crate::error::AppResult;
use crate::report::{self, ChartRow, ShopReport};

/// Photo uploaded alongside a product.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Input for a funded product registration.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: i64,
    pub funding_account: String,
    pub photo: Option<PhotoUpload>,
}

/// Input for recording a sale.
#[derive(Debug, Clone)]
pub struct SaleRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub customer: String,
    pub payment_method: PaymentMethod,
    pub installment_count: u32,
    pub receiving_account: String,
}

/// A shop session: the whole application state plus its record store.
///
/// Collections are loaded once when the session opens and mutated in
/// place. Every mutating operation validates first, applies the in-memory
/// change all-or-nothing, then rewrites the affected tables in full. There
/// is no ambient global state; callers own the `Shop` and serialize access
/// to it.
pub struct Shop {
    ledger: AccountLedger,
    inventory: Inventory,
    sales: SalesLog,
    installments: InstallmentBook,
    store: Arc<dyn RecordStore>,
    photos: PhotoStore,
}

impl Shop {
    /// Load all four tables from the store. Absent tables load as empty.
    pub fn open(store: Arc<dyn RecordStore>, photos: PhotoStore) -> AppResult<Self> {
        let ledger = AccountLedger::from_rows(store.load_accounts()?);
        let inventory = Inventory::from_rows(store.load_products()?);
        let sales = SalesLog::from_rows(store.load_sales()?);
        let installments = InstallmentBook::from_rows(store.load_installments()?);
        info!(
            accounts = ledger.len(),
            products = inventory.len(),
            sales = sales.len(),
            installments = installments.len(),
            "shop session opened"
        );
        Ok(Self {
            ledger,
            inventory,
            sales,
            installments,
            store,
            photos,
        })
    }

    // -------------------------
    // Accounts
    // -------------------------

    pub fn accounts(&self) -> &[Account] {
        self.ledger.accounts()
    }

    pub fn register_account(&mut self, name: &str, opening_balance: Money) -> AppResult<Account> {
        let account = self.ledger.register(name, opening_balance)?.clone();
        self.store.save_accounts(self.ledger.accounts())?;
        info!(account = %account.name, balance = %account.balance, "account registered");
        Ok(account)
    }

    // -------------------------
    // Products
    // -------------------------

    pub fn products(&self) -> &[Product] {
        self.inventory.products()
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.inventory.get(id)
    }

    /// Register a product, funding the purchase from `funding_account`.
    ///
    /// The cost is `purchase_price × quantity`. Registration is
    /// all-or-nothing: on any rejection (validation, duplicate name,
    /// absent account, insufficient funds) neither the product list nor
    /// the funding account changes. The photo, if any, is written before
    /// the ledger is touched, so a photo I/O failure also leaves every
    /// table unchanged.
    pub fn register_product(&mut self, new: NewProduct) -> AppResult<Product> {
        let mut product = Product {
            id: ProductId::new(),
            name: new.name,
            category: new.category,
            purchase_price: new.purchase_price,
            sale_price: new.sale_price,
            quantity: new.quantity,
            funding_account: new.funding_account,
            photo: None,
        };
        self.inventory.validate_new(&product)?;
        let cost = product.purchase_price.times(product.quantity)?;

        if let Some(upload) = &new.photo {
            let path = self
                .photos
                .save(product.name.trim(), &upload.filename, &upload.bytes)?;
            product.photo = Some(path);
        }

        if let Err(e) = self
            .ledger
            .debit_if_sufficient(&product.funding_account, cost)
        {
            warn!(
                product = %product.name,
                account = %product.funding_account,
                cost = %cost,
                "product registration rejected: {e}"
            );
            return Err(e.into());
        }
        let product = self.inventory.add(product)?.clone();

        self.store.save_products(self.inventory.products())?;
        self.store.save_accounts(self.ledger.accounts())?;
        info!(product = %product.name, cost = %cost, "product registered");
        Ok(product)
    }

    pub fn update_product(&mut self, id: ProductId, update: ProductUpdate) -> AppResult<Product> {
        let product = self.inventory.update(id, update)?.clone();
        self.store.save_products(self.inventory.products())?;
        info!(product = %product.name, "product updated");
        Ok(product)
    }

    /// Attach (or replace) a product photo.
    pub fn set_product_photo(
        &mut self,
        id: ProductId,
        filename: &str,
        bytes: &[u8],
    ) -> AppResult<Product> {
        let name = self
            .inventory
            .get(id)
            .ok_or(DomainError::NotFound)?
            .name
            .clone();
        let path = self.photos.save(&name, filename, bytes)?;
        let product = self
            .inventory
            .update(
                id,
                ProductUpdate {
                    photo: Some(path),
                    ..ProductUpdate::default()
                },
            )?
            .clone();
        self.store.save_products(self.inventory.products())?;
        Ok(product)
    }

    /// Delete a product row. The funding account is not compensated and
    /// recorded sales referencing the product stay in the log.
    pub fn remove_product(&mut self, id: ProductId) -> AppResult<Product> {
        let removed = self.inventory.remove(id)?;
        self.store.save_products(self.inventory.products())?;
        info!(product = %removed.name, "product removed");
        Ok(removed)
    }

    /// Products below the operational restock threshold.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.inventory.low_stock(LOW_STOCK_THRESHOLD)
    }

    // -------------------------
    // Sales
    // -------------------------

    pub fn sales(&self) -> &[Sale] {
        self.sales.sales()
    }

    /// Record a sale: one stock debit, one account credit, one log append.
    ///
    /// All validation happens before the first mutation, so a rejection
    /// (unknown product, insufficient stock) leaves product, account, and
    /// log untouched. The sale row captures the product's sale price at
    /// the moment of the call. The receiving account is credited through
    /// the ledger's signed-delta contract, which creates the account on
    /// first use.
    pub fn record_sale(&mut self, req: SaleRequest) -> AppResult<Sale> {
        if req.quantity < 1 {
            return Err(DomainError::validation("sale quantity must be at least 1").into());
        }
        if req.installment_count < 1 {
            return Err(DomainError::validation("installment count must be at least 1").into());
        }

        let product = self
            .inventory
            .get(req.product_id)
            .ok_or(DomainError::NotFound)?;
        if product.quantity < req.quantity {
            warn!(
                product = %product.name,
                requested = req.quantity,
                on_hand = product.quantity,
                "sale rejected: insufficient stock"
            );
            return Err(DomainError::insufficient_stock(&product.name).into());
        }
        let product_name = product.name.clone();
        let unit_price = product.sale_price;
        let total = unit_price.times(req.quantity)?;

        self.inventory.adjust_quantity(req.product_id, -req.quantity)?;
        self.ledger.apply_delta(&req.receiving_account, total);
        let sale = self
            .sales
            .append(Sale {
                id: SaleId::new(),
                product_id: req.product_id,
                product_name,
                quantity: req.quantity,
                unit_price,
                customer: req.customer,
                payment_method: req.payment_method,
                installment_count: req.installment_count,
                receiving_account: req.receiving_account,
                recorded_at: Utc::now(),
            })
            .clone();

        self.store.save_products(self.inventory.products())?;
        self.store.save_accounts(self.ledger.accounts())?;
        self.store.save_sales(self.sales.sales())?;
        info!(
            sale = %sale.id,
            product = %sale.product_name,
            quantity = sale.quantity,
            total = %total,
            "sale recorded"
        );
        Ok(sale)
    }

    // -------------------------
    // Installments
    // -------------------------

    pub fn installments(&self) -> &[InstallmentAgreement] {
        self.installments.agreements()
    }

    pub fn outstanding_installments(&self) -> Vec<&InstallmentAgreement> {
        self.installments.outstanding()
    }

    pub fn register_installment(
        &mut self,
        customer: &str,
        product: &str,
        amount: Money,
        term: u32,
        already_paid: bool,
    ) -> AppResult<InstallmentAgreement> {
        let agreement = self
            .installments
            .register(customer, product, amount, term, already_paid)?
            .clone();
        self.store
            .save_installments(self.installments.agreements())?;
        info!(customer = %agreement.customer, amount = %agreement.amount, "installment registered");
        Ok(agreement)
    }

    pub fn mark_installment_paid(&mut self, id: InstallmentId) -> AppResult<()> {
        self.installments.mark_paid(id)?;
        self.store
            .save_installments(self.installments.agreements())?;
        info!(installment = %id, "installment marked paid");
        Ok(())
    }

    // -------------------------
    // Reports
    // -------------------------

    pub fn report(&self) -> ShopReport {
        report::summarize(&self.inventory, &self.sales)
    }

    pub fn sales_by_product(&self) -> Vec<ChartRow> {
        report::units_sold_by_product(&self.sales)
    }

    pub fn stock_by_product(&self) -> Vec<ChartRow> {
        report::stock_by_product(&self.inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use varejo_store::{MemoryStore, StoreError, StoreResult};

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn open_shop() -> Shop {
        let dir = tempfile::tempdir().unwrap();
        let photos = PhotoStore::new(dir.path().join("images"));
        Shop::open(Arc::new(MemoryStore::new()), photos).unwrap()
    }

    fn camisa(funding_account: &str) -> NewProduct {
        NewProduct {
            name: "Camisa".to_string(),
            category: Category::Clothing,
            purchase_price: money(2_000),
            sale_price: money(5_000),
            quantity: 10,
            funding_account: funding_account.to_string(),
            photo: None,
        }
    }

    #[test]
    fn register_product_debits_funding_account() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();

        let product = shop.register_product(camisa("Caixa")).unwrap();
        assert_eq!(product.quantity, 10);
        assert_eq!(shop.accounts()[0].balance, money(80_000));
    }

    #[test]
    fn register_product_is_all_or_nothing_on_insufficient_funds() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(10_000)).unwrap();

        let err = shop.register_product(camisa("Caixa")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Rejected(DomainError::InsufficientFunds(_))
        ));
        assert!(shop.products().is_empty());
        assert_eq!(shop.accounts()[0].balance, money(10_000));
    }

    #[test]
    fn register_product_rejects_absent_funding_account() {
        let mut shop = open_shop();
        let err = shop.register_product(camisa("Caixa")).unwrap_err();
        assert!(matches!(err, AppError::Rejected(DomainError::NotFound)));
        assert!(shop.products().is_empty());
    }

    #[test]
    fn register_product_rejects_duplicate_before_debiting() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();
        shop.register_product(camisa("Caixa")).unwrap();
        let balance_before = shop.accounts()[0].balance;

        let err = shop.register_product(camisa("Caixa")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Rejected(DomainError::DuplicateProduct(_))
        ));
        assert_eq!(shop.accounts()[0].balance, balance_before);
        assert_eq!(shop.products().len(), 1);
    }

    #[test]
    fn record_sale_moves_stock_money_and_appends_log() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();

        let sale = shop
            .record_sale(SaleRequest {
                product_id: product.id,
                quantity: 3,
                customer: "Ana".to_string(),
                payment_method: PaymentMethod::Cash,
                installment_count: 1,
                receiving_account: "Caixa".to_string(),
            })
            .unwrap();

        assert_eq!(sale.unit_price, money(5_000));
        assert_eq!(shop.product(product.id).unwrap().quantity, 7);
        // 100_000 - 20_000 cost + 15_000 proceeds.
        assert_eq!(shop.accounts()[0].balance, money(95_000));
        assert_eq!(shop.sales().len(), 1);
    }

    #[test]
    fn record_sale_price_is_detached_from_later_edits() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();

        let sale = shop
            .record_sale(SaleRequest {
                product_id: product.id,
                quantity: 1,
                customer: "Ana".to_string(),
                payment_method: PaymentMethod::Pix,
                installment_count: 1,
                receiving_account: "Caixa".to_string(),
            })
            .unwrap();

        shop.update_product(
            product.id,
            ProductUpdate {
                sale_price: Some(money(9_900)),
                ..ProductUpdate::default()
            },
        )
        .unwrap();

        assert_eq!(shop.sales()[0].unit_price, money(5_000));
        assert_eq!(sale.unit_price, money(5_000));
    }

    #[test]
    fn record_sale_insufficient_stock_mutates_nothing() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();

        let err = shop
            .record_sale(SaleRequest {
                product_id: product.id,
                quantity: 99,
                customer: "Ana".to_string(),
                payment_method: PaymentMethod::Card,
                installment_count: 1,
                receiving_account: "Caixa".to_string(),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Rejected(DomainError::InsufficientStock(_))
        ));
        assert_eq!(shop.product(product.id).unwrap().quantity, 10);
        assert_eq!(shop.accounts()[0].balance, money(80_000));
        assert!(shop.sales().is_empty());
    }

    #[test]
    fn record_sale_credits_absent_receiving_account() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(100_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();

        shop.record_sale(SaleRequest {
            product_id: product.id,
            quantity: 2,
            customer: "Ana".to_string(),
            payment_method: PaymentMethod::Pix,
            installment_count: 1,
            receiving_account: "Pix".to_string(),
        })
        .unwrap();

        let pix = shop.accounts().iter().find(|a| a.name == "Pix").unwrap();
        assert_eq!(pix.balance, money(10_000));
    }

    #[test]
    fn installments_lifecycle() {
        let mut shop = open_shop();
        let agreement = shop
            .register_installment("Ana", "Camisa", money(15_000), 3, false)
            .unwrap();
        assert_eq!(shop.outstanding_installments().len(), 1);

        shop.mark_installment_paid(agreement.id).unwrap();
        assert!(shop.outstanding_installments().is_empty());

        assert!(matches!(
            shop.mark_installment_paid(InstallmentId::new()).unwrap_err(),
            AppError::Rejected(DomainError::NotFound)
        ));
    }

    #[test]
    fn low_stock_surfaces_products_under_threshold() {
        let mut shop = open_shop();
        shop.register_account("Caixa", money(1_000_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();
        assert!(shop.low_stock().is_empty());

        shop.record_sale(SaleRequest {
            product_id: product.id,
            quantity: 6,
            customer: "Ana".to_string(),
            payment_method: PaymentMethod::Cash,
            installment_count: 1,
            receiving_account: "Caixa".to_string(),
        })
        .unwrap();

        let low = shop.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].quantity, 4);
    }

    /// Store that accepts everything except the sales table.
    struct SalesWriteFails(MemoryStore);

    impl RecordStore for SalesWriteFails {
        fn load_accounts(&self) -> StoreResult<Vec<Account>> {
            self.0.load_accounts()
        }
        fn save_accounts(&self, rows: &[Account]) -> StoreResult<()> {
            self.0.save_accounts(rows)
        }
        fn load_products(&self) -> StoreResult<Vec<Product>> {
            self.0.load_products()
        }
        fn save_products(&self, rows: &[Product]) -> StoreResult<()> {
            self.0.save_products(rows)
        }
        fn load_sales(&self) -> StoreResult<Vec<Sale>> {
            self.0.load_sales()
        }
        fn save_sales(&self, _rows: &[Sale]) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }
        fn load_installments(&self) -> StoreResult<Vec<InstallmentAgreement>> {
            self.0.load_installments()
        }
        fn save_installments(&self, rows: &[InstallmentAgreement]) -> StoreResult<()> {
            self.0.save_installments(rows)
        }
    }

    #[test]
    fn persistence_failure_is_distinguishable_from_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let photos = PhotoStore::new(dir.path().join("images"));
        let mut shop =
            Shop::open(Arc::new(SalesWriteFails(MemoryStore::new())), photos).unwrap();
        shop.register_account("Caixa", money(100_000)).unwrap();
        let product = shop.register_product(camisa("Caixa")).unwrap();

        let err = shop
            .record_sale(SaleRequest {
                product_id: product.id,
                quantity: 1,
                customer: "Ana".to_string(),
                payment_method: PaymentMethod::Cash,
                installment_count: 1,
                receiving_account: "Caixa".to_string(),
            })
            .unwrap_err();

        // The in-memory mutation happened; only the snapshot write failed.
        assert!(matches!(err, AppError::Store(_)));
        assert_eq!(shop.product(product.id).unwrap().quantity, 9);
        assert_eq!(shop.sales().len(), 1);
    }
}
