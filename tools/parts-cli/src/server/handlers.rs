//! Route handlers.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use parts_market::location;
use parts_market::search::{RankedPage, SearchParams};
use parts_market::{BrandId, CategoryId, MarketError, RequestContext, RequestId};
use serde_json::json;

use super::error::ApiError;
use super::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the caller's request id or mint one.
fn request_context(req: &HttpRequest) -> RequestContext {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| RequestContext::with_id(RequestId::from_string(v)))
        .unwrap_or_default()
}

async fn run_search(
    state: &AppState,
    ctx: &RequestContext,
    params: SearchParams,
) -> Result<RankedPage, ApiError> {
    let criteria = params.into_criteria(&state.limits).map_err(|e| {
        tracing::debug!(request_id = %ctx.request_id, error = %e, "rejected search parameters");
        e
    })?;
    Ok(state.service.search(ctx, &criteria).await?)
}

/// Render a search outcome, tagging it with the request id either way.
fn respond(ctx: &RequestContext, result: Result<RankedPage, ApiError>) -> HttpResponse {
    let mut response = match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    };
    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

/// `GET /api/products/search`
pub async fn search_products(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<SearchParams>,
) -> HttpResponse {
    let ctx = request_context(&req);
    let result = run_search(&state, &ctx, query.into_inner()).await;
    respond(&ctx, result)
}

/// `GET /api/categories/{category_id}/products`
pub async fn category_products(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SearchParams>,
) -> HttpResponse {
    let ctx = request_context(&req);
    let mut params = query.into_inner();
    params.category_id = Some(path.into_inner());
    let result = run_search(&state, &ctx, params).await;
    respond(&ctx, result)
}

/// Map a catalog read failure to a generic 500, logging the cause.
fn lookup_failed(message: &'static str) -> impl FnOnce(MarketError) -> ApiError {
    move |source| {
        tracing::error!(error = %source, "{}", message);
        ApiError::LookupFailed { message, source }
    }
}

/// `GET /api/cars/brands`
pub async fn brands(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let brands = state
        .catalog
        .brands()
        .await
        .map_err(lookup_failed("Failed to fetch car brands"))?;
    Ok(HttpResponse::Ok().json(brands))
}

/// `GET /api/cars/models`
pub async fn models(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let models = state
        .catalog
        .models()
        .await
        .map_err(lookup_failed("Failed to fetch car models"))?;
    Ok(HttpResponse::Ok().json(models))
}

/// `GET /api/cars/brands/{brand_id}/models`
pub async fn brand_models(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let brand = BrandId::new(path.into_inner());
    let models = state
        .catalog
        .models_of_brand(&brand)
        .await
        .map_err(lookup_failed("Failed to fetch car models"))?;
    Ok(HttpResponse::Ok().json(models))
}

/// `GET /api/categories`
pub async fn categories(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = state
        .catalog
        .categories()
        .await
        .map_err(lookup_failed("Failed to fetch part categories"))?;
    Ok(HttpResponse::Ok().json(categories))
}

/// `GET /api/categories/{category_id}`
pub async fn category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = CategoryId::new(path.into_inner());
    let category = state
        .catalog
        .category(&id)
        .await
        .map_err(lookup_failed("Failed to fetch part category"))?
        .ok_or(ApiError::NotFound("Category not found"))?;
    Ok(HttpResponse::Ok().json(category))
}

/// `GET /api/locations/provinces`
pub async fn provinces() -> HttpResponse {
    let provinces: Vec<&str> = location::provinces().collect();
    HttpResponse::Ok().json(json!({ "provinces": provinces }))
}

/// `GET /api/locations/provinces/{province}/cities`
pub async fn cities(path: web::Path<String>) -> HttpResponse {
    let province = path.into_inner();
    let cities = location::cities_of(&province);
    HttpResponse::Ok().json(json!({ "province": province, "cities": cities }))
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
