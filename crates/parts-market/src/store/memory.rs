//! In-memory product store.

use async_trait::async_trait;

use crate::catalog::{BrandedModel, CarBrand, CarModel, Candidate, PartCategory};
use crate::error::MarketError;
use crate::ids::{BrandId, CategoryId};
use crate::search::{ProductPredicate, StoreQuery};
use crate::store::{CatalogStore, ProductStore};

/// Holds candidates in a `Vec` and evaluates predicates directly.
///
/// Applies the same filter and order semantics as the SQL backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: Vec<Candidate>,
}

impl MemoryProductStore {
    pub fn new(products: Vec<Candidate>) -> Self {
        Self { products }
    }

}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn fetch_page(&self, query: &StoreQuery) -> Result<Vec<Candidate>, MarketError> {
        let mut matching: Vec<&Candidate> = self
            .products
            .iter()
            .filter(|p| query.predicate.matches(p))
            .collect();
        matching.sort_by(|a, b| query.order.compare(a, b));

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &ProductPredicate) -> Result<u64, MarketError> {
        Ok(self.products.iter().filter(|p| predicate.matches(p)).count() as u64)
    }
}

/// Brands, models and categories held in `Vec`s, listed in the same order
/// as the SQL backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    brands: Vec<CarBrand>,
    models: Vec<CarModel>,
    categories: Vec<PartCategory>,
}

impl MemoryCatalogStore {
    pub fn new(brands: Vec<CarBrand>, models: Vec<CarModel>, categories: Vec<PartCategory>) -> Self {
        Self {
            brands,
            models,
            categories,
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn brands(&self) -> Result<Vec<CarBrand>, MarketError> {
        let mut brands = self.brands.clone();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    async fn models(&self) -> Result<Vec<BrandedModel>, MarketError> {
        let mut models: Vec<BrandedModel> = self
            .models
            .iter()
            .filter_map(|model| {
                let brand = self.brands.iter().find(|b| b.brand_id == model.brand_id)?;
                Some(BrandedModel {
                    model: model.clone(),
                    brand: brand.clone(),
                })
            })
            .collect();
        models.sort_by(|a, b| {
            a.brand
                .name
                .cmp(&b.brand.name)
                .then_with(|| a.model.name.cmp(&b.model.name))
        });
        Ok(models)
    }

    async fn models_of_brand(&self, brand: &BrandId) -> Result<Vec<CarModel>, MarketError> {
        let mut models: Vec<CarModel> = self
            .models
            .iter()
            .filter(|m| &m.brand_id == brand)
            .cloned()
            .collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(models)
    }

    async fn categories(&self) -> Result<Vec<PartCategory>, MarketError> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn category(&self, id: &CategoryId) -> Result<Option<PartCategory>, MarketError> {
        Ok(self.categories.iter().find(|c| &c.category_id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchCriteria, SortMode};
    use crate::seed;

    fn store() -> MemoryProductStore {
        let mut products = seed::sample_candidates();
        let mut hidden = products[0].clone();
        hidden.product_id = "prod-unapproved".into();
        hidden.is_approved = false;
        hidden.created_at += 1_000_000;
        products.push(hidden);
        MemoryProductStore::new(products)
    }

    fn names(page: &[Candidate]) -> Vec<&str> {
        page.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unapproved_never_returned() {
        let store = store();
        let q = SearchCriteria::new().store_query();
        let page = store.fetch_page(&q).await.unwrap();
        assert_eq!(page.len(), 4);
        assert!(page.iter().all(|c| c.is_approved));
        assert_eq!(store.count(&q.predicate).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_price_order() {
        let q = SearchCriteria::new().with_sort(SortMode::Price).store_query();
        let page = store().fetch_page(&q).await.unwrap();
        let prices: Vec<i64> = page.iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![15_000, 25_000, 85_000, 180_000]);
    }

    #[tokio::test]
    async fn test_newest_order() {
        let q = SearchCriteria::new().with_sort(SortMode::Newest).store_query();
        let page = store().fetch_page(&q).await.unwrap();
        assert_eq!(
            names(&page),
            vec![
                "Hyundai Elantra Alternator",
                "Nissan Altima Spark Plugs Set",
                "Toyota Camry Brake Pads Set",
                "Toyota Corolla Air Filter",
            ]
        );
    }

    #[tokio::test]
    async fn test_paging_window() {
        let store = store();
        let q = SearchCriteria::new()
            .with_sort(SortMode::Price)
            .with_pagination(2, 3)
            .store_query();
        let page = store.fetch_page(&q).await.unwrap();
        assert_eq!(names(&page), vec!["Hyundai Elantra Alternator"]);
        assert_eq!(store.count(&q.predicate).await.unwrap(), 4);

        let q = SearchCriteria::new().with_pagination(9, 3).store_query();
        assert!(store.fetch_page(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_brand_filter() {
        let q = SearchCriteria::new().with_brand("brand-toyota").store_query();
        let page = store().fetch_page(&q).await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.iter().all(|c| c.name.starts_with("Toyota")));
    }

    fn catalog() -> MemoryCatalogStore {
        let sample = seed::sample_catalog();
        MemoryCatalogStore::new(sample.brands, sample.models, sample.categories)
    }

    #[tokio::test]
    async fn test_catalog_listings_sorted_by_name() {
        let catalog = catalog();

        let brands = catalog.brands().await.unwrap();
        assert_eq!(brands.len(), 15);
        assert_eq!(brands[0].name, "Audi");

        let models = catalog.models().await.unwrap();
        assert_eq!(models.len(), 32);
        assert_eq!(models[0].brand.name, "BMW");
        assert_eq!(models[0].model.name, "3 Series");

        let categories = catalog.categories().await.unwrap();
        assert_eq!(categories[0].name, "Body Parts");
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let catalog = catalog();

        let kia = catalog.models_of_brand(&"brand-kia".into()).await.unwrap();
        let names: Vec<&str> = kia.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Forte", "Optima", "Rio", "Sorento", "Sportage"]);

        assert!(catalog
            .models_of_brand(&"brand-lada".into())
            .await
            .unwrap()
            .is_empty());

        let brakes = catalog.category(&"cat-brakes".into()).await.unwrap();
        assert_eq!(brakes.map(|c| c.name).as_deref(), Some("Brakes"));
        assert!(catalog.category(&"cat-none".into()).await.unwrap().is_none());
    }
}
