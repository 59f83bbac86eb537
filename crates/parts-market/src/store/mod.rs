//! Store module.
//!
//! The read-only seams the search pipeline and the catalog lookups fetch
//! through, with in-memory backends and (behind the `storage` feature) a
//! SQLite backend.

mod memory;
#[cfg(feature = "storage")]
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{BrandedModel, CarBrand, CarModel, Candidate, PartCategory};
use crate::error::MarketError;
use crate::ids::{BrandId, CategoryId};
use crate::search::{ProductPredicate, StoreQuery};

pub use memory::{MemoryCatalogStore, MemoryProductStore};
#[cfg(feature = "storage")]
pub use sqlite::{SqliteProductStore, SCHEMA};

/// Product store backend trait.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// One page of matching candidates in the query's native order, with
    /// dealer, category and compatibility data joined in.
    async fn fetch_page(&self, query: &StoreQuery) -> Result<Vec<Candidate>, MarketError>;

    /// Number of candidates matching the predicate, ignoring paging.
    async fn count(&self, predicate: &ProductPredicate) -> Result<u64, MarketError>;
}

#[async_trait]
impl<T: ProductStore + ?Sized> ProductStore for Arc<T> {
    async fn fetch_page(&self, query: &StoreQuery) -> Result<Vec<Candidate>, MarketError> {
        (**self).fetch_page(query).await
    }

    async fn count(&self, predicate: &ProductPredicate) -> Result<u64, MarketError> {
        (**self).count(predicate).await
    }
}

/// Read access to the brands, models and categories search filters refer to.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All brands by name.
    async fn brands(&self) -> Result<Vec<CarBrand>, MarketError>;

    /// All models with their brand, by brand name then model name.
    async fn models(&self) -> Result<Vec<BrandedModel>, MarketError>;

    /// Models of one brand by name. Empty for an unknown brand.
    async fn models_of_brand(&self, brand: &BrandId) -> Result<Vec<CarModel>, MarketError>;

    /// All categories by name.
    async fn categories(&self) -> Result<Vec<PartCategory>, MarketError>;

    async fn category(&self, id: &CategoryId) -> Result<Option<PartCategory>, MarketError>;
}
