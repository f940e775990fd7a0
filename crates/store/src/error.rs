use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store operation error.
///
/// These are **infrastructure errors** (filesystem, encoding) as opposed to
/// domain errors (validation, invariants). Callers use the distinction to
/// tell a safely-rejected operation from one whose in-memory and on-disk
/// state may have diverged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn table(path: impl Into<String>, source: csv::Error) -> Self {
        Self::Table {
            path: path.into(),
            source,
        }
    }
}
