//! Typed search criteria.

use crate::catalog::Condition;
use crate::ids::{BrandId, CategoryId, ModelId};
use crate::search::{Filter, ProductPredicate, StoreOrder, StoreQuery};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default page size when the caller does not give one.
pub const DEFAULT_LIMIT: u32 = 20;

/// How the returned page is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Nearest dealers first, falling back to newest.
    #[default]
    Location,
    /// Cheapest first.
    Price,
    /// Highest rated first.
    Rating,
    /// Most recently listed first.
    Newest,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Location => "location",
            SortMode::Price => "price",
            SortMode::Rating => "rating",
            SortMode::Newest => "newest",
        }
    }

    /// Parse a sort mode, ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "location" => Some(SortMode::Location),
            "price" => Some(SortMode::Price),
            "rating" => Some(SortMode::Rating),
            "newest" => Some(SortMode::Newest),
            _ => None,
        }
    }

    /// Order the store applies before any re-sort.
    pub fn store_order(&self) -> StoreOrder {
        match self {
            SortMode::Price => StoreOrder::PriceAsc,
            SortMode::Rating => StoreOrder::RatingDesc,
            SortMode::Location | SortMode::Newest => StoreOrder::Newest,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the requester is. Either part may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterLocation {
    pub province: Option<String>,
    pub city: Option<String>,
}

impl RequesterLocation {
    pub fn new(province: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            province: Some(province.into()),
            city: Some(city.into()),
        }
    }

    /// Province and city, only when both are known.
    pub fn both(&self) -> Option<(&str, &str)> {
        Some((self.province.as_deref()?, self.city.as_deref()?))
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub brand_id: Option<BrandId>,
    /// Takes precedence over `brand_id` when both are set.
    pub model_id: Option<ModelId>,
    pub category_id: Option<CategoryId>,
    pub condition: Option<Condition>,
    /// Inclusive lower price bound, in dinars.
    pub min_price: Option<i64>,
    /// Inclusive upper price bound, in dinars.
    pub max_price: Option<i64>,
    pub requester: RequesterLocation,
    /// 1-indexed page.
    pub page: u32,
    pub limit: u32,
    pub sort: SortMode,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self {
            text: None,
            brand_id: None,
            model_id: None,
            category_id: None,
            condition: None,
            min_price: None,
            max_price: None,
            requester: RequesterLocation::default(),
            page: 1,
            limit: DEFAULT_LIMIT,
            sort: SortMode::default(),
        }
    }

    /// Set the text term. Empty terms are ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.text = Some(text);
        }
        self
    }

    pub fn with_brand(mut self, brand: impl Into<BrandId>) -> Self {
        self.brand_id = Some(brand.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<ModelId>) -> Self {
        self.model_id = Some(model.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set price bounds. `min > max` is allowed and matches nothing.
    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_requester(mut self, province: impl Into<String>, city: impl Into<String>) -> Self {
        self.requester = RequesterLocation::new(province, city);
        self
    }

    pub fn with_requester_location(mut self, requester: RequesterLocation) -> Self {
        self.requester = requester;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. Page is at least 1 and limit at least 1.
    pub fn with_pagination(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    /// Rows skipped before the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// The store predicate for these criteria.
    pub fn predicate(&self) -> ProductPredicate {
        let mut filters = vec![Filter::Approved];

        if let Some(text) = &self.text {
            filters.push(Filter::text(text));
        }
        if let Some(category) = &self.category_id {
            filters.push(Filter::Category(category.clone()));
        }
        if let Some(condition) = self.condition {
            filters.push(Filter::Condition(condition));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            filters.push(Filter::price_range(self.min_price, self.max_price));
        }
        if let Some(model) = &self.model_id {
            filters.push(Filter::FitsModel(model.clone()));
        } else if let Some(brand) = &self.brand_id {
            filters.push(Filter::FitsBrand(brand.clone()));
        }

        ProductPredicate::new(filters)
    }

    /// Predicate plus native order and page window.
    pub fn store_query(&self) -> StoreQuery {
        StoreQuery {
            predicate: self.predicate(),
            order: self.sort.store_order(),
            limit: self.limit,
            offset: self.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SearchCriteria::new();
        assert_eq!(c.page, 1);
        assert_eq!(c.limit, 20);
        assert_eq!(c.sort, SortMode::Location);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let c = SearchCriteria::new().with_pagination(3, 10);
        assert_eq!(c.offset(), 20);

        let c = SearchCriteria::new().with_pagination(0, 0);
        assert_eq!((c.page, c.limit), (1, 1));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortMode::parse("PRICE"), Some(SortMode::Price));
        assert_eq!(SortMode::parse("newest"), Some(SortMode::Newest));
        assert_eq!(SortMode::parse("distance"), None);
    }

    #[test]
    fn test_store_order() {
        assert_eq!(SortMode::Location.store_order(), StoreOrder::Newest);
        assert_eq!(SortMode::Newest.store_order(), StoreOrder::Newest);
        assert_eq!(SortMode::Price.store_order(), StoreOrder::PriceAsc);
        assert_eq!(SortMode::Rating.store_order(), StoreOrder::RatingDesc);
    }

    #[test]
    fn test_predicate_always_requires_approval() {
        let p = SearchCriteria::new().predicate();
        assert_eq!(p.filters(), &[Filter::Approved]);
    }

    #[test]
    fn test_model_takes_precedence_over_brand() {
        let p = SearchCriteria::new()
            .with_brand("brand-toyota")
            .with_model("model-toyota-camry")
            .predicate();
        assert!(p.filters().contains(&Filter::FitsModel("model-toyota-camry".into())));
        assert!(!p.filters().iter().any(|f| matches!(f, Filter::FitsBrand(_))));
    }

    #[test]
    fn test_requester_both() {
        let mut r = RequesterLocation::new("Baghdad", "Al-Karrada");
        assert_eq!(r.both(), Some(("Baghdad", "Al-Karrada")));
        r.city = None;
        assert_eq!(r.both(), None);
    }
}
