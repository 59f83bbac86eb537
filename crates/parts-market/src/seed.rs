//! Sample catalog: brands, models, categories, two dealers, four listings.
//!
//! Identifiers are derived from names so repeated loads touch the same rows.

use crate::catalog::{
    CarBrand, CarModel, Candidate, CategoryRef, Condition, DealerInfo, Fitment, PartCategory,
};
use crate::ids::{BrandId, CategoryId, DealerId, ModelId, ProductId};

#[cfg(feature = "storage")]
use crate::error::MarketError;
#[cfg(feature = "storage")]
use crate::store::SqliteProductStore;

const BRANDS: &[&str] = &[
    "Toyota",
    "Nissan",
    "Hyundai",
    "Kia",
    "BMW",
    "Mercedes-Benz",
    "Audi",
    "Volkswagen",
    "Ford",
    "Chevrolet",
    "Honda",
    "Mazda",
    "Mitsubishi",
    "Suzuki",
    "Isuzu",
];

/// (brand, model, first year, last year)
const MODELS: &[(&str, &str, i32, i32)] = &[
    ("Toyota", "Corolla", 2010, 2024),
    ("Toyota", "Camry", 2010, 2024),
    ("Toyota", "RAV4", 2012, 2024),
    ("Toyota", "Land Cruiser", 2008, 2024),
    ("Toyota", "Hilux", 2010, 2024),
    ("Toyota", "Prius", 2015, 2024),
    ("Nissan", "Altima", 2010, 2024),
    ("Nissan", "Sentra", 2010, 2024),
    ("Nissan", "Pathfinder", 2012, 2024),
    ("Nissan", "X-Trail", 2014, 2024),
    ("Nissan", "Navara", 2010, 2024),
    ("Nissan", "Patrol", 2008, 2024),
    ("Hyundai", "Elantra", 2010, 2024),
    ("Hyundai", "Sonata", 2010, 2024),
    ("Hyundai", "Tucson", 2012, 2024),
    ("Hyundai", "Santa Fe", 2010, 2024),
    ("Hyundai", "Accent", 2010, 2024),
    ("Kia", "Optima", 2010, 2024),
    ("Kia", "Forte", 2010, 2024),
    ("Kia", "Sportage", 2012, 2024),
    ("Kia", "Sorento", 2010, 2024),
    ("Kia", "Rio", 2010, 2024),
    ("BMW", "3 Series", 2010, 2024),
    ("BMW", "5 Series", 2010, 2024),
    ("BMW", "X3", 2012, 2024),
    ("BMW", "X5", 2010, 2024),
    ("BMW", "7 Series", 2010, 2024),
    ("Mercedes-Benz", "C-Class", 2010, 2024),
    ("Mercedes-Benz", "E-Class", 2010, 2024),
    ("Mercedes-Benz", "S-Class", 2010, 2024),
    ("Mercedes-Benz", "GLC", 2015, 2024),
    ("Mercedes-Benz", "GLE", 2010, 2024),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("Engine Parts", "Engine components and accessories"),
    ("Transmission", "Transmission system parts"),
    ("Brakes", "Brake system components"),
    ("Electrical", "Electrical system parts"),
    ("Body Parts", "Exterior body components"),
    ("Suspension", "Suspension system parts"),
    ("Exhaust", "Exhaust system components"),
    ("Filters", "Air, oil, and fuel filters"),
    ("Lights", "Headlights, taillights, and indicators"),
    ("Interior", "Interior components and accessories"),
    ("Tires & Wheels", "Tires, rims, and wheel accessories"),
    ("Oil & Fluids", "Engine oil, coolant, and other fluids"),
];

/// Listing timestamps start here and advance a day per product.
const FIRST_LISTED_AT: i64 = 1_717_200_000;

/// Lowercase, alphanumeric words joined by `-`.
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn brand_id(brand: &str) -> BrandId {
    BrandId::new(format!("brand-{}", slug(brand)))
}

pub fn model_id(brand: &str, model: &str) -> ModelId {
    ModelId::new(format!("model-{}-{}", slug(brand), slug(model)))
}

pub fn category_id(category: &str) -> CategoryId {
    CategoryId::new(format!("cat-{}", slug(category)))
}

/// Everything the sample load writes.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub brands: Vec<CarBrand>,
    pub models: Vec<CarModel>,
    pub categories: Vec<PartCategory>,
    pub dealers: Vec<DealerInfo>,
    pub products: Vec<Candidate>,
}

pub fn sample_catalog() -> SampleCatalog {
    let brands = BRANDS
        .iter()
        .map(|name| CarBrand {
            brand_id: brand_id(name),
            name: name.to_string(),
        })
        .collect();

    let models = MODELS
        .iter()
        .map(|(brand, model, start, end)| CarModel {
            model_id: model_id(brand, model),
            brand_id: brand_id(brand),
            name: model.to_string(),
            year_start: Some(*start),
            year_end: Some(*end),
        })
        .collect();

    let categories = CATEGORIES
        .iter()
        .map(|(name, description)| PartCategory::new(category_id(name), *name, Some(*description)))
        .collect();

    SampleCatalog {
        brands,
        models,
        categories,
        dealers: sample_dealers(),
        products: sample_candidates(),
    }
}

fn sample_dealers() -> Vec<DealerInfo> {
    vec![
        DealerInfo {
            dealer_id: DealerId::new("dealer-mohammed-auto-parts"),
            name: "Mohammed Auto Parts".into(),
            store_name: Some("Mohammed Auto Parts - Karrada Branch".into()),
            province: Some("Baghdad".into()),
            city: Some("Baghdad".into()),
        },
        DealerInfo {
            dealer_id: DealerId::new("dealer-basra-spare-parts"),
            name: "Basra Spare Parts".into(),
            store_name: Some("Basra Spare Parts - Main Store".into()),
            province: Some("Basra".into()),
            city: Some("Basra".into()),
        },
    ]
}

struct SampleListing {
    name: &'static str,
    price: i64,
    stock: i64,
    description: &'static str,
    part_number: &'static str,
    condition: Condition,
    category: &'static str,
    dealer: usize,
    fits: (&'static str, &'static str),
}

const LISTINGS: &[SampleListing] = &[
    SampleListing {
        name: "Toyota Corolla Air Filter",
        price: 15_000,
        stock: 50,
        description: "High-quality air filter for Toyota Corolla 2010-2024. \
                      Improves engine performance and fuel efficiency.",
        part_number: "17801-0E020",
        condition: Condition::New,
        category: "Filters",
        dealer: 0,
        fits: ("Toyota", "Corolla"),
    },
    SampleListing {
        name: "Toyota Camry Brake Pads Set",
        price: 85_000,
        stock: 25,
        description: "Complete brake pads set for Toyota Camry 2010-2024. \
                      Ceramic compound for longer life and better performance.",
        part_number: "04465-0E020",
        condition: Condition::New,
        category: "Brakes",
        dealer: 0,
        fits: ("Toyota", "Camry"),
    },
    SampleListing {
        name: "Nissan Altima Spark Plugs Set",
        price: 25_000,
        stock: 30,
        description: "Set of 4 iridium spark plugs for Nissan Altima 2010-2024. \
                      Improves fuel efficiency and engine performance.",
        part_number: "22401-1EA0A",
        condition: Condition::New,
        category: "Engine Parts",
        dealer: 1,
        fits: ("Nissan", "Altima"),
    },
    SampleListing {
        name: "Hyundai Elantra Alternator",
        price: 180_000,
        stock: 8,
        description: "High-output alternator for Hyundai Elantra 2010-2024. \
                      120A output for reliable electrical power.",
        part_number: "31120-2A000",
        condition: Condition::Refurbished,
        category: "Electrical",
        dealer: 1,
        fits: ("Hyundai", "Elantra"),
    },
];

/// The four approved sample listings, oldest first.
pub fn sample_candidates() -> Vec<Candidate> {
    let dealers = sample_dealers();

    LISTINGS
        .iter()
        .zip(0_i64..)
        .map(|(listing, i)| {
            let (brand, model) = listing.fits;
            Candidate {
                product_id: ProductId::new(format!("prod-{}", slug(listing.name))),
                name: listing.name.to_string(),
                description: Some(listing.description.to_string()),
                part_number: Some(listing.part_number.to_string()),
                oem_number: Some(listing.part_number.to_string()),
                price: listing.price,
                rating: None,
                stock_quantity: listing.stock,
                condition: listing.condition,
                is_approved: true,
                created_at: FIRST_LISTED_AT + i * 86_400,
                dealer: dealers[listing.dealer].clone(),
                category: CategoryRef {
                    category_id: category_id(listing.category),
                    name: listing.category.to_string(),
                },
                compatibility: vec![Fitment {
                    model_id: model_id(brand, model),
                    model_name: model.to_string(),
                    brand_id: brand_id(brand),
                    brand_name: brand.to_string(),
                }],
            }
        })
        .collect()
}

/// Counts of rows written by [`load_sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub brands: usize,
    pub models: usize,
    pub categories: usize,
    pub dealers: usize,
    pub products: usize,
}

/// Create the schema and upsert the sample catalog.
#[cfg(feature = "storage")]
pub async fn load_sample(store: &SqliteProductStore) -> Result<SeedSummary, MarketError> {
    let catalog = sample_catalog();
    store.migrate().await?;

    for brand in &catalog.brands {
        store.upsert_brand(brand).await?;
    }
    for model in &catalog.models {
        store.upsert_model(model).await?;
    }
    for category in &catalog.categories {
        store.upsert_category(category).await?;
    }
    for dealer in &catalog.dealers {
        store.upsert_dealer(dealer).await?;
    }
    for product in &catalog.products {
        store.upsert_product(product).await?;
    }

    let summary = SeedSummary {
        brands: catalog.brands.len(),
        models: catalog.models.len(),
        categories: catalog.categories.len(),
        dealers: catalog.dealers.len(),
        products: catalog.products.len(),
    };
    tracing::info!(?summary, "sample catalog loaded");
    Ok(summary)
}
