//! Car brands and models used for compatibility filtering.

use crate::ids::{BrandId, ModelId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarBrand {
    pub brand_id: BrandId,
    pub name: String,
}

/// A model of a brand, produced over an optional range of years.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarModel {
    pub model_id: ModelId,
    pub brand_id: BrandId,
    pub name: String,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
}

/// A model with its brand embedded, as listed across all brands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandedModel {
    #[serde(flatten)]
    pub model: CarModel,
    pub brand: CarBrand,
}
