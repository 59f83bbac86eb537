//! Raw request parameters and their validation into [`SearchCriteria`].

use crate::catalog::Condition;
use crate::error::MarketError;
use crate::search::{RequesterLocation, SearchCriteria, SortMode};
use serde::{Deserialize, Serialize};

/// Page-size bounds applied at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: crate::search::DEFAULT_LIMIT,
            max_limit: 100,
        }
    }
}

/// Flat, untyped query parameters as a client sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: Option<String>,
    pub brand_id: Option<String>,
    pub model_id: Option<String>,
    pub category_id: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub customer_province: Option<String>,
    pub customer_city: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
}

impl SearchParams {
    /// Validate into typed criteria.
    ///
    /// Blank values count as absent. Numbers that do not parse and unknown
    /// enum values are rejected; page and limit are clamped into range.
    pub fn into_criteria(self, limits: &SearchLimits) -> Result<SearchCriteria, MarketError> {
        let page = parse_int::<i64>("page", self.page.as_deref())?.unwrap_or(1);
        let limit = parse_int::<i64>("limit", self.limit.as_deref())?
            .unwrap_or_else(|| i64::from(limits.default_limit));
        let max_limit = i64::from(limits.max_limit.max(1));

        let condition = match present(self.condition.as_deref()) {
            Some(raw) => Some(Condition::parse(raw).ok_or_else(|| {
                MarketError::invalid("condition", format!("unknown condition `{raw}`"))
            })?),
            None => None,
        };

        let sort = match present(self.sort_by.as_deref()) {
            Some(raw) => SortMode::parse(raw).ok_or_else(|| {
                MarketError::invalid("sortBy", format!("unknown sort mode `{raw}`"))
            })?,
            None => SortMode::default(),
        };

        let mut criteria = SearchCriteria::new()
            .with_price_range(
                parse_int("minPrice", self.min_price.as_deref())?,
                parse_int("maxPrice", self.max_price.as_deref())?,
            )
            .with_requester_location(RequesterLocation {
                province: owned(self.customer_province),
                city: owned(self.customer_city),
            })
            .with_sort(sort)
            .with_pagination(
                clamp_to_u32(page.max(1)),
                clamp_to_u32(limit.clamp(1, max_limit)),
            );

        criteria.text = owned(self.search);
        criteria.brand_id = owned(self.brand_id).map(Into::into);
        criteria.model_id = owned(self.model_id).map(Into::into);
        criteria.category_id = owned(self.category_id).map(Into::into);
        criteria.condition = condition;

        Ok(criteria)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn owned(value: Option<String>) -> Option<String> {
    present(value.as_deref()).map(str::to_string)
}

fn parse_int<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, MarketError> {
    match present(raw) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| MarketError::invalid(name, format!("`{raw}` is not an integer"))),
        None => Ok(None),
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let c = SearchParams::default()
            .into_criteria(&SearchLimits::default())
            .unwrap();
        assert_eq!(c, SearchCriteria::new());
    }

    #[test]
    fn test_full_params() {
        let c = params(&[
            ("search", "brake"),
            ("brandId", "brand-toyota"),
            ("modelId", "model-toyota-camry"),
            ("categoryId", "cat-brakes"),
            ("condition", "new"),
            ("minPrice", "20000"),
            ("maxPrice", "100000"),
            ("customerProvince", "Baghdad"),
            ("customerCity", "Al-Karrada"),
            ("page", "2"),
            ("limit", "5"),
            ("sortBy", "Price"),
        ])
        .into_criteria(&SearchLimits::default())
        .unwrap();

        assert_eq!(c.text.as_deref(), Some("brake"));
        assert_eq!(c.model_id, Some("model-toyota-camry".into()));
        assert_eq!(c.condition, Some(Condition::New));
        assert_eq!((c.min_price, c.max_price), (Some(20_000), Some(100_000)));
        assert_eq!(c.requester.both(), Some(("Baghdad", "Al-Karrada")));
        assert_eq!((c.page, c.limit), (2, 5));
        assert_eq!(c.sort, SortMode::Price);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let c = params(&[("search", "  "), ("customerCity", ""), ("page", "")])
            .into_criteria(&SearchLimits::default())
            .unwrap();
        assert_eq!(c.text, None);
        assert_eq!(c.requester.city, None);
        assert_eq!(c.page, 1);
    }

    #[test]
    fn test_clamping() {
        let limits = SearchLimits::default();
        let c = params(&[("page", "0"), ("limit", "500")])
            .into_criteria(&limits)
            .unwrap();
        assert_eq!((c.page, c.limit), (1, 100));

        let c = params(&[("page", "-4"), ("limit", "0")])
            .into_criteria(&limits)
            .unwrap();
        assert_eq!((c.page, c.limit), (1, 1));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let err = params(&[("minPrice", "cheap")])
            .into_criteria(&SearchLimits::default())
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("minPrice"));

        assert!(params(&[("page", "1.5")])
            .into_criteria(&SearchLimits::default())
            .is_err());
    }

    #[test]
    fn test_unknown_enums_rejected() {
        let limits = SearchLimits::default();
        assert!(params(&[("condition", "broken")]).into_criteria(&limits).is_err());
        assert!(params(&[("sortBy", "distance")]).into_criteria(&limits).is_err());
    }

    #[test]
    fn test_inverted_price_range_passes_through() {
        let c = params(&[("minPrice", "100000"), ("maxPrice", "20000")])
            .into_criteria(&SearchLimits::default())
            .unwrap();
        assert_eq!((c.min_price, c.max_price), (Some(100_000), Some(20_000)));
    }
}
