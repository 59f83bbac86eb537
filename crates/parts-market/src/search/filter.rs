//! Search filter types.

use crate::catalog::{Candidate, Condition};
use crate::ids::{BrandId, CategoryId, ModelId};
use serde::{Deserialize, Serialize};

#[cfg(feature = "storage")]
use parts_db::Value;

/// One conjunct of a product predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Only approved listings. Always present.
    Approved,
    /// Case-insensitive substring on name, description, part number or OEM number.
    Text(String),
    /// Exact category.
    Category(CategoryId),
    /// Exact condition.
    Condition(Condition),
    /// Inclusive price bounds in dinars.
    PriceRange { min: Option<i64>, max: Option<i64> },
    /// Some compatibility record references this model.
    FitsModel(ModelId),
    /// Some compatible model belongs to this brand.
    FitsBrand(BrandId),
}

impl Filter {
    pub fn text(term: impl Into<String>) -> Self {
        Filter::Text(term.into())
    }

    pub fn price_range(min: Option<i64>, max: Option<i64>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Evaluate the filter against an in-memory candidate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            Filter::Approved => candidate.is_approved,
            Filter::Text(term) => {
                let needle = fold_case(term);
                candidate
                    .searchable_fields()
                    .any(|field| fold_case(field).contains(&needle))
            }
            Filter::Category(id) => &candidate.category.category_id == id,
            Filter::Condition(condition) => candidate.condition == *condition,
            Filter::PriceRange { min, max } => {
                min.map_or(true, |min| candidate.price >= min)
                    && max.map_or(true, |max| candidate.price <= max)
            }
            Filter::FitsModel(model) => candidate.fits_model(model),
            Filter::FitsBrand(brand) => candidate.fits_brand(brand),
        }
    }

    /// Build SQL WHERE clause component against `products p`.
    #[cfg(feature = "storage")]
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            Filter::Approved => ("p.is_approved = 1".to_string(), vec![]),
            Filter::Text(term) => {
                // SQLite's LOWER() only folds ASCII, so match the pre-folded column.
                let pattern = format!("%{}%", escape_like(&fold_case(term)));
                (
                    "p.search_text LIKE ? ESCAPE '\\'".to_string(),
                    vec![Value::from(pattern)],
                )
            }
            Filter::Category(id) => ("p.category_id = ?".to_string(), vec![id.as_str().into()]),
            Filter::Condition(condition) => (
                "p.item_condition = ?".to_string(),
                vec![condition.as_str().into()],
            ),
            Filter::PriceRange { min, max } => {
                let mut clauses = Vec::new();
                let mut values = Vec::new();
                if let Some(min) = min {
                    clauses.push("p.price >= ?");
                    values.push(Value::from(*min));
                }
                if let Some(max) = max {
                    clauses.push("p.price <= ?");
                    values.push(Value::from(*max));
                }
                if clauses.is_empty() {
                    return ("1=1".to_string(), vec![]);
                }
                (clauses.join(" AND "), values)
            }
            Filter::FitsModel(model) => (
                "EXISTS (SELECT 1 FROM product_compatibility pc \
                 WHERE pc.product_id = p.product_id AND pc.model_id = ?)"
                    .to_string(),
                vec![model.as_str().into()],
            ),
            Filter::FitsBrand(brand) => (
                "EXISTS (SELECT 1 FROM product_compatibility pc \
                 JOIN car_models m ON m.model_id = pc.model_id \
                 WHERE pc.product_id = p.product_id AND m.brand_id = ?)"
                    .to_string(),
                vec![brand.as_str().into()],
            ),
        }
    }
}

/// Joins the folded fields of a search document.
pub const SEARCH_FIELD_SEPARATOR: &str = "\u{1f}";

/// Unicode lowercase, applied to both the term and the searched text.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// The value stored in `products.search_text` for a candidate.
pub fn search_document(candidate: &Candidate) -> String {
    candidate
        .searchable_fields()
        .map(fold_case)
        .collect::<Vec<_>>()
        .join(SEARCH_FIELD_SEPARATOR)
}

/// Escape LIKE wildcards so the term matches literally under `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
