//! End-to-end search over an in-memory SQLite catalog.

use parts_db::Db;
use parts_market::catalog::{
    CarBrand, CarModel, Candidate, CategoryRef, Condition, DealerInfo, Fitment, PartCategory,
};
use parts_market::prelude::*;
use parts_market::seed;

fn dealer(id: &str, province: Option<&str>, city: Option<&str>) -> DealerInfo {
    DealerInfo {
        dealer_id: DealerId::new(id),
        name: format!("Dealer {id}"),
        store_name: None,
        province: province.map(str::to_string),
        city: city.map(str::to_string),
    }
}

fn listing(id: &str, price: i64, created_at: i64, dealer: &DealerInfo) -> Candidate {
    Candidate {
        product_id: ProductId::new(id),
        name: format!("Brake disc {id}"),
        description: None,
        part_number: None,
        oem_number: None,
        price,
        rating: None,
        stock_quantity: 3,
        condition: Condition::Used,
        is_approved: true,
        created_at,
        dealer: dealer.clone(),
        category: CategoryRef {
            category_id: CategoryId::new("cat-brakes"),
            name: "Brakes".into(),
        },
        compatibility: vec![Fitment {
            model_id: ModelId::new("model-kia-rio"),
            model_name: "Rio".into(),
            brand_id: BrandId::new("brand-kia"),
            brand_name: "Kia".into(),
        }],
    }
}

/// Three dealers (same city, same province, other province) plus one with
/// no location, one unapproved listing, and prices 15000/85000/200000.
async fn fixture() -> SearchService<SqliteProductStore> {
    let store = SqliteProductStore::new(Db::open_in_memory().await.unwrap());
    store.migrate().await.unwrap();

    store
        .upsert_brand(&CarBrand {
            brand_id: BrandId::new("brand-kia"),
            name: "Kia".into(),
        })
        .await
        .unwrap();
    store
        .upsert_model(&CarModel {
            model_id: ModelId::new("model-kia-rio"),
            brand_id: BrandId::new("brand-kia"),
            name: "Rio".into(),
            year_start: Some(2010),
            year_end: Some(2024),
        })
        .await
        .unwrap();
    store
        .upsert_category(&PartCategory::new("cat-brakes", "Brakes", None))
        .await
        .unwrap();

    let karrada = dealer("karrada", Some("Baghdad"), Some("Al-Karrada"));
    let mosul = dealer("mosul", Some("Baghdad"), Some("Mosul"));
    let basra = dealer("basra", Some("Basra"), Some("Basra"));
    let nowhere = dealer("nowhere", None, None);
    for d in [&karrada, &mosul, &basra, &nowhere] {
        store.upsert_dealer(d).await.unwrap();
    }

    // Newest first in store order: C, B, A, D.
    let a = listing("A", 85_000, 100, &karrada);
    let b = listing("B", 200_000, 200, &mosul);
    let c = listing("C", 15_000, 300, &basra);
    let d = listing("D", 50_000, 50, &nowhere);
    let mut hidden = listing("H", 60_000, 400, &karrada);
    hidden.is_approved = false;

    for p in [&a, &b, &c, &d, &hidden] {
        store.upsert_product(p).await.unwrap();
    }

    SearchService::new(store)
}

fn ids(page: &RankedPage) -> Vec<&str> {
    page.products
        .iter()
        .map(|p| p.candidate.product_id.as_str())
        .collect()
}

#[tokio::test]
async fn location_sort_ranks_same_city_first() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new().with_requester("Baghdad", "Al-Karrada");
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();

    assert_eq!(ids(&page), vec!["A", "B", "C", "D"]);
    let scores: Vec<Option<u32>> = page
        .products
        .iter()
        .map(|p| p.location_score.map(|s| s.score))
        .collect();
    assert_eq!(scores, vec![Some(100), Some(50), Some(10), None]);
    assert_eq!(page.pagination.total, 4);
}

#[tokio::test]
async fn location_sort_without_city_falls_back_to_recency() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new().with_requester_location(RequesterLocation {
        province: Some("Baghdad".into()),
        city: None,
    });
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();

    assert_eq!(ids(&page), vec!["C", "B", "A", "D"]);
    assert!(page.products.iter().all(|p| p.location_score.is_none()));
}

#[tokio::test]
async fn unapproved_listings_never_appear() {
    let svc = fixture().await;
    for sort in [SortMode::Location, SortMode::Price, SortMode::Rating, SortMode::Newest] {
        let criteria = SearchCriteria::new().with_sort(sort);
        let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
        assert!(!ids(&page).contains(&"H"));
        assert_eq!(page.pagination.total, 4);
    }
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new()
        .with_price_range(Some(20_000), Some(100_000))
        .with_sort(SortMode::Price);
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert_eq!(ids(&page), vec!["D", "A"]);

    let criteria = SearchCriteria::new().with_price_range(Some(85_000), Some(85_000));
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert_eq!(ids(&page), vec!["A"]);
}

#[tokio::test]
async fn inverted_price_range_is_empty() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new().with_price_range(Some(100_000), Some(20_000));
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn unknown_model_gives_empty_page() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new().with_model("model-toyota-prius");
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert!(page.products.is_empty());
    assert_eq!(page.pagination.total, 0);
    assert_eq!(page.pagination.pages, 0);
}

#[tokio::test]
async fn model_refines_brand() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new()
        .with_brand("brand-kia")
        .with_model("model-unknown");
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert_eq!(page.pagination.total, 0);

    let criteria = SearchCriteria::new().with_brand("brand-kia");
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();
    assert_eq!(page.pagination.total, 4);
}

#[tokio::test]
async fn pagination_counts_full_filtered_set() {
    let svc = fixture().await;
    let criteria = SearchCriteria::new()
        .with_sort(SortMode::Newest)
        .with_pagination(2, 3);
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();

    assert_eq!(ids(&page), vec!["D"]);
    assert_eq!(page.pagination.total, 4);
    assert_eq!(page.pagination.pages, 2);
    assert!(!page.pagination.has_next());
}

#[tokio::test]
async fn validated_params_drive_the_pipeline() {
    let svc = fixture().await;
    let params = SearchParams {
        search: Some("brake DISC".into()),
        customer_province: Some("Basra".into()),
        customer_city: Some("Basra".into()),
        sort_by: Some("LOCATION".into()),
        limit: Some("2".into()),
        ..SearchParams::default()
    };
    let criteria = params.into_criteria(&SearchLimits::default()).unwrap();
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();

    // Page holds the two newest (C, B); C is in Basra.
    assert_eq!(ids(&page), vec!["C", "B"]);
    assert_eq!(page.pagination.pages, 2);
}

#[tokio::test]
async fn sample_catalog_is_searchable() {
    let store = SqliteProductStore::new(Db::open_in_memory().await.unwrap());
    seed::load_sample(&store).await.unwrap();
    let svc = SearchService::new(store);

    let criteria = SearchCriteria::new()
        .with_condition(Condition::Refurbished)
        .with_requester("Baghdad", "Al-Karrada");
    let page = svc.search(&RequestContext::new(), &criteria).await.unwrap();

    assert_eq!(page.products.len(), 1);
    let alternator = &page.products[0];
    assert_eq!(alternator.candidate.name, "Hyundai Elantra Alternator");
    assert_eq!(alternator.location_score.map(|s| s.reason), Some("Different province"));
}
