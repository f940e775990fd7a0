use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use varejo_accounts::Account;
use varejo_installments::InstallmentAgreement;
use varejo_inventory::Product;
use varejo_sales::Sale;

use crate::RecordStore;
use crate::error::{StoreError, StoreResult};

const ACCOUNTS_FILE: &str = "accounts.csv";
const PRODUCTS_FILE: &str = "products.csv";
const SALES_FILE: &str = "sales.csv";
const INSTALLMENTS_FILE: &str = "installments.csv";

/// Comma-delimited record store: one headered file per table under a data
/// directory, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    /// Table files are created lazily on first save.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(dir.display().to_string(), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn table_path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_table<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Vec<T>> {
        let path = self.table_path(file);
        if !path.exists() {
            // Absent file: an empty table, not an error.
            return Ok(Vec::new());
        }

        let display = path.display().to_string();
        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| StoreError::table(display.clone(), e))?;
        reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()
            .map_err(|e| StoreError::table(display, e))
    }

    fn write_table<T: Serialize>(&self, file: &str, rows: &[T]) -> StoreResult<()> {
        let path = self.table_path(file);
        let display = path.display().to_string();

        let mut writer =
            csv::Writer::from_path(&path).map_err(|e| StoreError::table(display.clone(), e))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| StoreError::table(display.clone(), e))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::io(display, e))
    }
}

impl RecordStore for CsvStore {
    fn load_accounts(&self) -> StoreResult<Vec<Account>> {
        self.read_table(ACCOUNTS_FILE)
    }

    fn save_accounts(&self, rows: &[Account]) -> StoreResult<()> {
        self.write_table(ACCOUNTS_FILE, rows)
    }

    fn load_products(&self) -> StoreResult<Vec<Product>> {
        self.read_table(PRODUCTS_FILE)
    }

    fn save_products(&self, rows: &[Product]) -> StoreResult<()> {
        self.write_table(PRODUCTS_FILE, rows)
    }

    fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        self.read_table(SALES_FILE)
    }

    fn save_sales(&self, rows: &[Sale]) -> StoreResult<()> {
        self.write_table(SALES_FILE, rows)
    }

    fn load_installments(&self) -> StoreResult<Vec<InstallmentAgreement>> {
        self.read_table(INSTALLMENTS_FILE)
    }

    fn save_installments(&self, rows: &[InstallmentAgreement]) -> StoreResult<()> {
        self.write_table(INSTALLMENTS_FILE, rows)
    }
}
