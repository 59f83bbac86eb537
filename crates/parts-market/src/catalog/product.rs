//! Product listing types as seen by search.

use crate::ids::{BrandId, CategoryId, DealerId, ModelId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical condition of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    New,
    Used,
    Refurbished,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Used => "USED",
            Condition::Refurbished => "REFURBISHED",
        }
    }

    /// Parse a condition, ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Some(Condition::New),
            "USED" => Some(Condition::Used),
            "REFURBISHED" => Some(Condition::Refurbished),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seller of a listing. Province and city drive location scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealerInfo {
    pub dealer_id: DealerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

impl DealerInfo {
    /// The dealer's (province, city) when both are present and non-empty.
    pub fn location(&self) -> Option<(&str, &str)> {
        let province = self.province.as_deref().filter(|p| !p.is_empty())?;
        let city = self.city.as_deref().filter(|c| !c.is_empty())?;
        Some((province, city))
    }
}

/// Category a listing belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub category_id: CategoryId,
    pub name: String,
}

/// One car model a part is compatible with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fitment {
    pub model_id: ModelId,
    pub model_name: String,
    pub brand_id: BrandId,
    pub brand_name: String,
}

/// A product snapshot taken at query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub part_number: Option<String>,
    pub oem_number: Option<String>,
    /// Price in dinars.
    pub price: i64,
    pub rating: Option<f64>,
    pub stock_quantity: i64,
    pub condition: Condition,
    pub is_approved: bool,
    /// Unix timestamp (seconds) of creation.
    pub created_at: i64,
    pub dealer: DealerInfo,
    pub category: CategoryRef,
    #[serde(default)]
    pub compatibility: Vec<Fitment>,
}

impl Candidate {
    pub fn price_money(&self) -> Money {
        Money::iqd(self.price)
    }

    /// Name, description, part number and OEM number, skipping absent ones.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.part_number.as_deref(),
            self.oem_number.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether any compatibility record references `model`.
    pub fn fits_model(&self, model: &ModelId) -> bool {
        self.compatibility.iter().any(|f| &f.model_id == model)
    }

    /// Whether any compatible model belongs to `brand`.
    pub fn fits_brand(&self, brand: &BrandId) -> bool {
        self.compatibility.iter().any(|f| &f.brand_id == brand)
    }
}
