//! End-to-end shop scenarios against the file-backed store, including a
//! session reopen to prove the snapshot survives a restart.

use std::sync::Arc;

use varejo_app::{AppError, NewProduct, SaleRequest, Shop};
use varejo_core::{DomainError, Money};
use varejo_inventory::Category;
use varejo_sales::PaymentMethod;
use varejo_store::{CsvStore, PhotoStore};

fn money(cents: i64) -> Money {
    Money::from_cents(cents)
}

#[test]
fn shop_lifecycle_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CsvStore::open(dir.path()).unwrap());
    let photos = PhotoStore::new(dir.path().join("images"));

    let product_id = {
        let mut shop = Shop::open(store.clone(), photos.clone()).unwrap();

        // Empty accounts, empty products; register Caixa with 1000.00.
        shop.register_account("Caixa", money(100_000)).unwrap();

        // Camisa: purchase 20.00, sale 50.00, quantity 10, funded by Caixa.
        let product = shop
            .register_product(NewProduct {
                name: "Camisa".to_string(),
                category: Category::Clothing,
                purchase_price: money(2_000),
                sale_price: money(5_000),
                quantity: 10,
                funding_account: "Caixa".to_string(),
                photo: None,
            })
            .unwrap();
        assert_eq!(shop.accounts()[0].balance, money(80_000));
        assert_eq!(product.quantity, 10);

        // Sell 3 to Ana, cash, into Caixa.
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
        assert_eq!(shop.accounts()[0].balance, money(95_000));
        assert_eq!(shop.sales().len(), 1);

        // Overselling fails and changes nothing.
        let err = shop
            .record_sale(SaleRequest {
                product_id: product.id,
                quantity: 99,
                customer: "Ana".to_string(),
                payment_method: PaymentMethod::Cash,
                installment_count: 1,
                receiving_account: "Caixa".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Rejected(DomainError::InsufficientStock(_))
        ));
        assert_eq!(shop.product(product.id).unwrap().quantity, 7);
        assert_eq!(shop.accounts()[0].balance, money(95_000));

        // A 1500.00 purchase against a 950.00 balance fails with no trace.
        let err = shop
            .register_product(NewProduct {
                name: "Jaqueta".to_string(),
                category: Category::Clothing,
                purchase_price: money(50_000),
                sale_price: money(80_000),
                quantity: 3,
                funding_account: "Caixa".to_string(),
                photo: None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Rejected(DomainError::InsufficientFunds(_))
        ));
        assert_eq!(shop.products().len(), 1);
        assert_eq!(shop.accounts()[0].balance, money(95_000));

        shop.register_installment("Ana", "Camisa", money(15_000), 3, false)
            .unwrap();

        product.id
    };

    // Reopen: every table reloads with identical values.
    let shop = Shop::open(store, photos).unwrap();
    assert_eq!(shop.accounts().len(), 1);
    assert_eq!(shop.accounts()[0].balance, money(95_000));
    assert_eq!(shop.product(product_id).unwrap().quantity, 7);
    assert_eq!(shop.sales().len(), 1);
    assert_eq!(shop.sales()[0].unit_price, money(5_000));
    assert_eq!(shop.outstanding_installments().len(), 1);

    let report = shop.report();
    assert_eq!(report.total_purchase_cost, money(14_000));
    assert_eq!(report.total_sales_revenue, money(15_000));
    assert_eq!(report.inventory_value, money(35_000));
    assert_eq!(report.gross_margin_approx, money(1_000));
}

#[test]
fn photo_upload_lands_in_the_photo_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CsvStore::open(dir.path()).unwrap());
    let photos = PhotoStore::new(dir.path().join("images"));
    let mut shop = Shop::open(store, photos).unwrap();

    shop.register_account("Caixa", money(100_000)).unwrap();
    let product = shop
        .register_product(NewProduct {
            name: "Camisa".to_string(),
            category: Category::Clothing,
            purchase_price: money(2_000),
            sale_price: money(5_000),
            quantity: 10,
            funding_account: "Caixa".to_string(),
            photo: Some(varejo_app::PhotoUpload {
                filename: "frente.jpg".to_string(),
                bytes: b"jpeg-bytes".to_vec(),
            }),
        })
        .unwrap();

    let path = product.photo.unwrap();
    assert!(path.ends_with("Camisa_frente.jpg"));
    assert_eq!(std::fs::read(path).unwrap(), b"jpeg-bytes");
}
