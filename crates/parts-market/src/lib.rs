//! Car-parts marketplace domain types and location-aware product search.
//!
//! This crate provides:
//!
//! - **Catalog**: Product listings, dealers, part categories, car brands/models
//! - **Location**: Iraq region catalog and the three-tier location score
//! - **Search**: Criteria, filter builder, store order, ranker, pagination
//! - **Store**: The `ProductStore` and `CatalogStore` seams with SQLite and
//!   in-memory backends
//!
//! # Example
//!
//! ```rust,ignore
//! use parts_market::prelude::*;
//!
//! let store = SqliteProductStore::new(db);
//! let service = SearchService::new(store);
//!
//! let criteria = SearchCriteria::new()
//!     .with_text("brake")
//!     .with_requester("Baghdad", "Al-Karrada")
//!     .with_sort(SortMode::Location);
//!
//! let page = service.search(&RequestContext::new(), &criteria).await?;
//! println!("{} of {} results", page.products.len(), page.pagination.total);
//! ```

pub mod context;
pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod location;
pub mod search;
pub mod seed;
pub mod store;

pub use context::{RequestContext, RequestId};
pub use error::MarketError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::context::{RequestContext, RequestId};
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        BrandedModel, CarBrand, CarModel, Candidate, CategoryRef, Condition, DealerInfo, Fitment,
        PartCategory,
    };

    // Location
    pub use crate::location::{score_location, LocationScore, LocationTier};

    // Search
    pub use crate::search::{
        Pagination, ProductPredicate, RankedCandidate, RankedPage, RequesterLocation,
        SearchCriteria, SearchLimits, SearchParams, SearchService, SortMode, StoreOrder,
        StoreQuery,
    };

    // Store
    pub use crate::store::{CatalogStore, MemoryCatalogStore, MemoryProductStore, ProductStore};
    #[cfg(feature = "storage")]
    pub use crate::store::SqliteProductStore;
}
