//! Type-safe SQLite database layer for the parts marketplace.
//!
//! Wraps an sqlx SQLite pool behind a small, dynamically-typed API: statements
//! take a slice of [`Value`] parameters and results come back as [`Row`]s that
//! can be deserialized into any `serde` type.
//!
//! # Example
//!
//! ```rust,ignore
//! use parts_db::{Db, params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Brand {
//!     brand_id: String,
//!     name: String,
//! }
//!
//! let db = Db::open_in_memory().await?;
//! db.execute_batch("CREATE TABLE car_brands (brand_id TEXT PRIMARY KEY, name TEXT)").await?;
//! db.execute(
//!     "INSERT INTO car_brands (brand_id, name) VALUES (?, ?)",
//!     params!["toyota", "Toyota"],
//! ).await?;
//!
//! let brands: Vec<Brand> = db.query_as("SELECT * FROM car_brands", params![]).await?;
//! ```

mod db;
mod error;
mod types;

pub use db::{Db, Transaction};
pub use error::DbError;
pub use types::{QueryResult, Row, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{params, Db, DbError, QueryResult, Row, Value};
}

/// Create a parameter list for SQL statements.
///
/// # Example
///
/// ```rust
/// use parts_db::{params, Value};
///
/// let params: &[Value] = params!["Toyota", 42_i64, true];
/// assert_eq!(params.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
