//! HTTP search and catalog API.

mod error;
mod handlers;

use std::sync::Arc;

use actix_web::web;
use parts_market::search::{SearchLimits, SearchService};
use parts_market::store::{CatalogStore, ProductStore};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub service: SearchService<Arc<dyn ProductStore>>,
    pub catalog: Arc<dyn CatalogStore>,
    pub limits: SearchLimits,
}

/// Register every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/products/search", web::get().to(handlers::search_products))
                .route("/cars/brands", web::get().to(handlers::brands))
                .route("/cars/models", web::get().to(handlers::models))
                .route(
                    "/cars/brands/{brand_id}/models",
                    web::get().to(handlers::brand_models),
                )
                .route("/categories", web::get().to(handlers::categories))
                .route("/categories/{category_id}", web::get().to(handlers::category))
                .route(
                    "/categories/{category_id}/products",
                    web::get().to(handlers::category_products),
                )
                .route("/locations/provinces", web::get().to(handlers::provinces))
                .route(
                    "/locations/provinces/{province}/cities",
                    web::get().to(handlers::cities),
                ),
        );
}
