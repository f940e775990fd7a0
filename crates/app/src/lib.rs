//! Shop session: the application-state struct owning the four collections
//! and their record store, plus derived reports.

pub mod error;
pub mod report;
pub mod shop;

pub use error::{AppError, AppResult};
pub use report::{ChartRow, ShopReport};
pub use shop::{NewProduct, PhotoUpload, SaleRequest, Shop};
