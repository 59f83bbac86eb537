//! Catalog module.
//!
//! Contains listings, dealers, categories, and the car brand/model data used
//! for compatibility.

mod category;
mod product;
mod vehicle;

pub use category::PartCategory;
pub use product::{Candidate, CategoryRef, Condition, DealerInfo, Fitment};
pub use vehicle::{BrandedModel, CarBrand, CarModel};
