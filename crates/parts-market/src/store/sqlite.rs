//! SQLite-backed product store.

use std::collections::HashMap;

use async_trait::async_trait;
use parts_db::{params, Db, Value};
use serde::Deserialize;

use crate::catalog::{
    BrandedModel, CarBrand, CarModel, Candidate, CategoryRef, Condition, DealerInfo, Fitment,
    PartCategory,
};
use crate::error::MarketError;
use crate::ids::{BrandId, CategoryId, DealerId, ProductId};
use crate::search::{search_document, ProductPredicate, StoreQuery};
use crate::store::{CatalogStore, ProductStore};

/// Marketplace tables. Every statement is idempotent.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS car_brands (
    brand_id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS car_models (
    model_id TEXT PRIMARY KEY,
    brand_id TEXT NOT NULL REFERENCES car_brands(brand_id),
    name TEXT NOT NULL,
    year_start INTEGER,
    year_end INTEGER
);

CREATE TABLE IF NOT EXISTS part_categories (
    category_id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS dealers (
    dealer_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    store_name TEXT,
    province TEXT,
    city TEXT
);

CREATE TABLE IF NOT EXISTS products (
    product_id TEXT PRIMARY KEY,
    dealer_id TEXT NOT NULL REFERENCES dealers(dealer_id),
    category_id TEXT NOT NULL REFERENCES part_categories(category_id),
    name TEXT NOT NULL,
    description TEXT,
    part_number TEXT,
    oem_number TEXT,
    price INTEGER NOT NULL CHECK (price > 0),
    rating REAL,
    stock_quantity INTEGER NOT NULL DEFAULT 0,
    item_condition TEXT NOT NULL CHECK (item_condition IN ('NEW', 'USED', 'REFURBISHED')),
    is_approved INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    search_text TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS product_compatibility (
    product_id TEXT NOT NULL REFERENCES products(product_id) ON DELETE CASCADE,
    model_id TEXT NOT NULL REFERENCES car_models(model_id),
    PRIMARY KEY (product_id, model_id)
);

CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id);
CREATE INDEX IF NOT EXISTS idx_compatibility_model ON product_compatibility(model_id);
"#;

/// Flat row produced by the page query.
#[derive(Debug, Deserialize)]
struct CandidateRow {
    product_id: String,
    name: String,
    description: Option<String>,
    part_number: Option<String>,
    oem_number: Option<String>,
    price: i64,
    rating: Option<f64>,
    stock_quantity: i64,
    condition: Condition,
    is_approved: i64,
    created_at: i64,
    category_id: String,
    category_name: String,
    dealer_id: String,
    dealer_name: String,
    dealer_store_name: Option<String>,
    dealer_province: Option<String>,
    dealer_city: Option<String>,
}

impl CandidateRow {
    fn into_candidate(self, compatibility: Vec<Fitment>) -> Candidate {
        Candidate {
            product_id: ProductId::new(self.product_id),
            name: self.name,
            description: self.description,
            part_number: self.part_number,
            oem_number: self.oem_number,
            price: self.price,
            rating: self.rating,
            stock_quantity: self.stock_quantity,
            condition: self.condition,
            is_approved: self.is_approved != 0,
            created_at: self.created_at,
            dealer: DealerInfo {
                dealer_id: DealerId::new(self.dealer_id),
                name: self.dealer_name,
                store_name: self.dealer_store_name,
                province: self.dealer_province,
                city: self.dealer_city,
            },
            category: CategoryRef {
                category_id: CategoryId::new(self.category_id),
                name: self.category_name,
            },
            compatibility,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    model_id: String,
    brand_id: String,
    name: String,
    year_start: Option<i32>,
    year_end: Option<i32>,
    brand_name: String,
}

impl ModelRow {
    fn into_model(self) -> CarModel {
        CarModel {
            model_id: self.model_id.into(),
            brand_id: self.brand_id.into(),
            name: self.name,
            year_start: self.year_start,
            year_end: self.year_end,
        }
    }
}

const MODEL_COLUMNS: &str = "m.model_id, m.brand_id, m.name, m.year_start, m.year_end, \
     b.name AS brand_name";

#[derive(Debug, Deserialize)]
struct FitmentRow {
    product_id: String,
    model_id: String,
    model_name: String,
    brand_id: String,
    brand_name: String,
}

/// Product store over a [`Db`] pool.
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    db: Db,
}

impl SqliteProductStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Create the marketplace tables if they do not exist.
    pub async fn migrate(&self) -> Result<(), MarketError> {
        self.db.execute_batch(SCHEMA).await?;
        Ok(())
    }

    pub async fn upsert_brand(&self, brand: &CarBrand) -> Result<(), MarketError> {
        self.db
            .execute(
                "INSERT INTO car_brands (brand_id, name) VALUES (?, ?) \
                 ON CONFLICT(brand_id) DO UPDATE SET name = excluded.name",
                params![brand.brand_id.as_str(), brand.name.as_str()],
            )
            .await?;
        Ok(())
    }

    pub async fn upsert_model(&self, model: &CarModel) -> Result<(), MarketError> {
        self.db
            .execute(
                "INSERT INTO car_models (model_id, brand_id, name, year_start, year_end) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT(model_id) DO UPDATE SET brand_id = excluded.brand_id, \
                 name = excluded.name, year_start = excluded.year_start, \
                 year_end = excluded.year_end",
                params![
                    model.model_id.as_str(),
                    model.brand_id.as_str(),
                    model.name.as_str(),
                    model.year_start,
                    model.year_end,
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn upsert_category(&self, category: &PartCategory) -> Result<(), MarketError> {
        self.db
            .execute(
                "INSERT INTO part_categories (category_id, name, description) VALUES (?, ?, ?) \
                 ON CONFLICT(category_id) DO UPDATE SET name = excluded.name, \
                 description = excluded.description",
                params![
                    category.category_id.as_str(),
                    category.name.as_str(),
                    category.description.as_deref(),
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn upsert_dealer(&self, dealer: &DealerInfo) -> Result<(), MarketError> {
        self.db
            .execute(
                "INSERT INTO dealers (dealer_id, name, store_name, province, city) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT(dealer_id) DO UPDATE SET name = excluded.name, \
                 store_name = excluded.store_name, province = excluded.province, \
                 city = excluded.city",
                params![
                    dealer.dealer_id.as_str(),
                    dealer.name.as_str(),
                    dealer.store_name.as_deref(),
                    dealer.province.as_deref(),
                    dealer.city.as_deref(),
                ],
            )
            .await?;
        Ok(())
    }

    /// Insert or replace a product and its compatibility records in one
    /// transaction.
    ///
    /// The dealer, category and referenced models must already exist.
    pub async fn upsert_product(&self, product: &Candidate) -> Result<(), MarketError> {
        let mut tx = self.db.begin().await?;

        tx.execute(
            "INSERT INTO products (product_id, dealer_id, category_id, name, description, \
             part_number, oem_number, price, rating, stock_quantity, item_condition, \
             is_approved, created_at, search_text) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(product_id) DO UPDATE SET dealer_id = excluded.dealer_id, \
             category_id = excluded.category_id, name = excluded.name, \
             description = excluded.description, part_number = excluded.part_number, \
             oem_number = excluded.oem_number, price = excluded.price, \
             rating = excluded.rating, stock_quantity = excluded.stock_quantity, \
             item_condition = excluded.item_condition, is_approved = excluded.is_approved, \
             created_at = excluded.created_at, search_text = excluded.search_text",
            params![
                product.product_id.as_str(),
                product.dealer.dealer_id.as_str(),
                product.category.category_id.as_str(),
                product.name.as_str(),
                product.description.as_deref(),
                product.part_number.as_deref(),
                product.oem_number.as_deref(),
                product.price,
                product.rating,
                product.stock_quantity,
                product.condition.as_str(),
                product.is_approved,
                product.created_at,
                search_document(product),
            ],
        )
        .await?;

        tx.execute(
            "DELETE FROM product_compatibility WHERE product_id = ?",
            params![product.product_id.as_str()],
        )
        .await?;

        for fitment in &product.compatibility {
            tx.execute(
                "INSERT OR IGNORE INTO product_compatibility (product_id, model_id) \
                 VALUES (?, ?)",
                params![product.product_id.as_str(), fitment.model_id.as_str()],
            )
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn fitments_for(
        &self,
        product_ids: &[&str],
    ) -> Result<HashMap<String, Vec<Fitment>>, MarketError> {
        let mut by_product: HashMap<String, Vec<Fitment>> = HashMap::new();
        if product_ids.is_empty() {
            return Ok(by_product);
        }

        let placeholders = product_ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let sql = format!(
            "SELECT pc.product_id, m.model_id, m.name AS model_name, \
             b.brand_id, b.name AS brand_name \
             FROM product_compatibility pc \
             JOIN car_models m ON m.model_id = pc.model_id \
             JOIN car_brands b ON b.brand_id = m.brand_id \
             WHERE pc.product_id IN ({placeholders}) \
             ORDER BY b.name, m.name"
        );
        let values: Vec<Value> = product_ids.iter().map(|id| Value::from(*id)).collect();

        let rows: Vec<FitmentRow> = self.db.query_as(&sql, &values).await?;
        for row in rows {
            by_product.entry(row.product_id).or_default().push(Fitment {
                model_id: row.model_id.into(),
                model_name: row.model_name,
                brand_id: row.brand_id.into(),
                brand_name: row.brand_name,
            });
        }

        Ok(by_product)
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn fetch_page(&self, query: &StoreQuery) -> Result<Vec<Candidate>, MarketError> {
        let (sql, values) = query.build_sql();
        let rows: Vec<CandidateRow> = self.db.query_as(&sql, &values).await?;

        let ids: Vec<&str> = rows.iter().map(|r| r.product_id.as_str()).collect();
        let mut fitments = self.fitments_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let compatibility = fitments.remove(&row.product_id).unwrap_or_default();
                row.into_candidate(compatibility)
            })
            .collect())
    }

    async fn count(&self, predicate: &ProductPredicate) -> Result<u64, MarketError> {
        let (sql, values) = predicate.build_count_sql();
        let count = self.db.query_scalar(&sql, &values).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[async_trait]
impl CatalogStore for SqliteProductStore {
    async fn brands(&self) -> Result<Vec<CarBrand>, MarketError> {
        Ok(self
            .db
            .query_as("SELECT brand_id AS brandId, name FROM car_brands ORDER BY name", params![])
            .await?)
    }

    async fn models(&self) -> Result<Vec<BrandedModel>, MarketError> {
        let sql = format!(
            "SELECT {MODEL_COLUMNS} FROM car_models m \
             JOIN car_brands b ON b.brand_id = m.brand_id \
             ORDER BY b.name, m.name"
        );
        let rows: Vec<ModelRow> = self.db.query_as(&sql, params![]).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let brand = CarBrand {
                    brand_id: BrandId::new(row.brand_id.clone()),
                    name: row.brand_name.clone(),
                };
                BrandedModel {
                    model: row.into_model(),
                    brand,
                }
            })
            .collect())
    }

    async fn models_of_brand(&self, brand: &BrandId) -> Result<Vec<CarModel>, MarketError> {
        let sql = format!(
            "SELECT {MODEL_COLUMNS} FROM car_models m \
             JOIN car_brands b ON b.brand_id = m.brand_id \
             WHERE m.brand_id = ? ORDER BY m.name"
        );
        let rows: Vec<ModelRow> = self.db.query_as(&sql, params![brand.as_str()]).await?;
        Ok(rows.into_iter().map(ModelRow::into_model).collect())
    }

    async fn categories(&self) -> Result<Vec<PartCategory>, MarketError> {
        Ok(self
            .db
            .query_as(
                "SELECT category_id AS categoryId, name, description FROM part_categories \
                 ORDER BY name",
                params![],
            )
            .await?)
    }

    async fn category(&self, id: &CategoryId) -> Result<Option<PartCategory>, MarketError> {
        Ok(self
            .db
            .query_optional(
                "SELECT category_id AS categoryId, name, description FROM part_categories \
                 WHERE category_id = ?",
                params![id.as_str()],
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchCriteria, SortMode};
    use crate::seed;

    async fn seeded() -> SqliteProductStore {
        let store = SqliteProductStore::new(Db::open_in_memory().await.unwrap());
        seed::load_sample(&store).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = SqliteProductStore::new(Db::open_in_memory().await.unwrap());
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_joins_dealer_category_and_fitment() {
        let store = seeded().await;
        let q = SearchCriteria::new().with_text("camry").store_query();
        let page = store.fetch_page(&q).await.unwrap();

        assert_eq!(page.len(), 1);
        let camry = &page[0];
        assert_eq!(camry.price, 85_000);
        assert_eq!(camry.condition, Condition::New);
        assert_eq!(camry.category.name, "Brakes");
        assert_eq!(camry.dealer.province.as_deref(), Some("Baghdad"));
        assert_eq!(camry.compatibility.len(), 1);
        assert_eq!(camry.compatibility[0].model_name, "Camry");
        assert_eq!(camry.compatibility[0].brand_name, "Toyota");
    }

    #[tokio::test]
    async fn test_sql_matches_memory_store() {
        let sqlite = seeded().await;
        let memory = crate::store::MemoryProductStore::new(seed::sample_candidates());

        let cases = [
            SearchCriteria::new(),
            SearchCriteria::new().with_sort(SortMode::Price),
            SearchCriteria::new().with_sort(SortMode::Rating),
            SearchCriteria::new().with_text("SET"),
            SearchCriteria::new().with_brand("brand-nissan"),
            SearchCriteria::new().with_condition(Condition::Refurbished),
            SearchCriteria::new().with_price_range(Some(20_000), Some(100_000)),
            SearchCriteria::new().with_pagination(2, 3),
        ];

        for criteria in cases {
            let q = criteria.store_query();
            let a = sqlite.fetch_page(&q).await.unwrap();
            let b = memory.fetch_page(&q).await.unwrap();
            assert_eq!(a, b, "{criteria:?}");
            assert_eq!(
                sqlite.count(&q.predicate).await.unwrap(),
                memory.count(&q.predicate).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_text_ignores_case_beyond_ascii() {
        let sqlite = seeded().await;
        let mut products = seed::sample_candidates();
        let mut kurdish = products[0].clone();
        kurdish.product_id = "prod-kurdish-air-filter".into();
        kurdish.name = "Şûşeya Pêşî Filter".into();
        kurdish.description = Some("ÇARÇOVEYA HEWAYÊ".into());
        sqlite.upsert_product(&kurdish).await.unwrap();
        products.push(kurdish);
        let memory = crate::store::MemoryProductStore::new(products);

        for term in ["şûşeya", "ŞÛŞEYA", "pêşî filter", "çarçoveya hewayê"] {
            let q = SearchCriteria::new().with_text(term).store_query();
            assert_eq!(sqlite.count(&q.predicate).await.unwrap(), 1, "{term}");
            assert_eq!(memory.count(&q.predicate).await.unwrap(), 1, "{term}");
            assert_eq!(
                sqlite.fetch_page(&q).await.unwrap(),
                memory.fetch_page(&q).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let store = seeded().await;
        let q = SearchCriteria::new().with_text("%").store_query();
        assert!(store.fetch_page(&q).await.unwrap().is_empty());
        assert_eq!(store.count(&q.predicate).await.unwrap(), 0);

        let q = SearchCriteria::new().with_text("_").store_query();
        assert_eq!(store.count(&q.predicate).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_product_replaces_fitment() {
        let store = seeded().await;
        let mut corolla = seed::sample_candidates()
            .into_iter()
            .find(|c| c.name.contains("Corolla"))
            .unwrap();
        corolla.compatibility.clear();
        store.upsert_product(&corolla).await.unwrap();

        let q = SearchCriteria::new()
            .with_model("model-toyota-corolla")
            .store_query();
        assert_eq!(store.count(&q.predicate).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_upsert_keeps_previous_fitment() {
        let store = seeded().await;
        let mut camry = seed::sample_candidates()
            .into_iter()
            .find(|c| c.name.contains("Camry"))
            .unwrap();
        camry.price = 1;
        let mut ghost = camry.compatibility[0].clone();
        ghost.model_id = "model-unknown".into();
        camry.compatibility.push(ghost);

        assert!(store.upsert_product(&camry).await.is_err());

        let q = SearchCriteria::new()
            .with_model("model-toyota-camry")
            .store_query();
        let page = store.fetch_page(&q).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].price, 85_000);
        assert_eq!(page[0].compatibility.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_reads_match_memory_catalog() {
        let sqlite = seeded().await;
        let sample = seed::sample_catalog();
        let memory =
            crate::store::MemoryCatalogStore::new(sample.brands, sample.models, sample.categories);

        assert_eq!(sqlite.brands().await.unwrap(), memory.brands().await.unwrap());
        assert_eq!(sqlite.models().await.unwrap(), memory.models().await.unwrap());
        assert_eq!(
            sqlite.categories().await.unwrap(),
            memory.categories().await.unwrap()
        );

        let toyota = sqlite.models_of_brand(&"brand-toyota".into()).await.unwrap();
        assert_eq!(toyota.len(), 6);
        assert_eq!(toyota[0].name, "Camry");
        assert_eq!(toyota[0].year_start, Some(2010));
        assert!(sqlite
            .models_of_brand(&"brand-lada".into())
            .await
            .unwrap()
            .is_empty());

        let filters = sqlite.category(&"cat-filters".into()).await.unwrap().unwrap();
        assert_eq!(filters.description.as_deref(), Some("Air, oil, and fuel filters"));
        assert!(sqlite.category(&"cat-none".into()).await.unwrap().is_none());
    }
}
