//! Store predicate, native order, and SQL generation.

use crate::catalog::Candidate;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[cfg(feature = "storage")]
use parts_db::Value;

/// Order the store returns rows in. Ties always fall back to product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StoreOrder {
    /// Most recently created first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Highest rating first, unrated last.
    RatingDesc,
}

impl StoreOrder {
    /// Get SQL ORDER BY clause.
    pub fn to_sql(&self) -> &'static str {
        match self {
            StoreOrder::Newest => "p.created_at DESC, p.product_id ASC",
            StoreOrder::PriceAsc => "p.price ASC, p.product_id ASC",
            StoreOrder::RatingDesc => "p.rating IS NULL, p.rating DESC, p.product_id ASC",
        }
    }

    /// Same ordering as [`to_sql`](Self::to_sql), for in-memory candidates.
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let primary = match self {
            StoreOrder::Newest => b.created_at.cmp(&a.created_at),
            StoreOrder::PriceAsc => a.price.cmp(&b.price),
            StoreOrder::RatingDesc => match (a.rating, b.rating) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        primary.then_with(|| a.product_id.cmp(&b.product_id))
    }
}

/// Conjunction of filters selecting the listings a search may return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPredicate {
    filters: Vec<Filter>,
}

impl ProductPredicate {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.filters.iter().all(|f| f.matches(candidate))
    }

    /// Build SQL WHERE clause from filters.
    #[cfg(feature = "storage")]
    pub fn build_where_clause(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut all_values = Vec::new();

        for filter in &self.filters {
            let (clause, values) = filter.to_sql();
            if clause != "1=1" {
                clauses.push(format!("({clause})"));
                all_values.extend(values);
            }
        }

        if clauses.is_empty() {
            return ("1=1".to_string(), vec![]);
        }

        (clauses.join(" AND "), all_values)
    }

    /// Build count SQL query.
    #[cfg(feature = "storage")]
    pub fn build_count_sql(&self) -> (String, Vec<Value>) {
        let (where_clause, values) = self.build_where_clause();
        let sql = format!("SELECT COUNT(*) AS count FROM products p WHERE {where_clause}");
        (sql, values)
    }
}

/// One page request against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreQuery {
    pub predicate: ProductPredicate,
    pub order: StoreOrder,
    pub limit: u32,
    pub offset: u64,
}

#[cfg(feature = "storage")]
const PAGE_COLUMNS: &str = "\
    p.product_id, p.name, p.description, p.part_number, p.oem_number, \
    p.price, p.rating, p.stock_quantity, p.item_condition AS condition, \
    p.is_approved, p.created_at, \
    c.category_id, c.name AS category_name, \
    d.dealer_id, d.name AS dealer_name, d.store_name AS dealer_store_name, \
    d.province AS dealer_province, d.city AS dealer_city";

impl StoreQuery {
    /// Build the SQL for one page of joined candidate rows.
    #[cfg(feature = "storage")]
    pub fn build_sql(&self) -> (String, Vec<Value>) {
        let (where_clause, mut values) = self.predicate.build_where_clause();
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM products p \
             JOIN dealers d ON d.dealer_id = p.dealer_id \
             JOIN part_categories c ON c.category_id = p.category_id \
             WHERE {where_clause} ORDER BY {} LIMIT ? OFFSET ?",
            self.order.to_sql()
        );
        values.push(Value::from(self.limit));
        values.push(Value::Integer(i64::try_from(self.offset).unwrap_or(i64::MAX)));
        (sql, values)
    }
}
