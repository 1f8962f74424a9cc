//! Public storefront: browse, search and view products without signing in.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    AppState,
    analytics::kpis,
    api::models::{
        catalogue::{CatalogueQuery, CatalogueResponse, CatalogueSummary, ProductDetailResponse},
        products::ProductResponse,
    },
    db::handlers::{ProductFilter, ProductSearch, Products, Repository},
    errors::{Error, Result},
};

const RELATED_PRODUCTS: usize = 3;
const FEATURED_PRODUCTS: usize = 6;

/// Browse the catalogue
#[utoipa::path(
    get,
    path = "/catalogue",
    tag = "catalogue",
    params(CatalogueQuery),
    responses(
        (status = 200, description = "Matching products plus category counts", body = CatalogueResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_catalogue(State(state): State<AppState>, Query(query): Query<CatalogueQuery>) -> Result<Json<CatalogueResponse>> {
    let mut file = state.products.lock().await;
    let mut repo = Products::new(&mut file);
    let all = repo.all().await?;

    let mut filter = ProductFilter::default();
    if let Some(q) = query.q {
        filter = filter.with_search(q, ProductSearch::Catalogue);
    }
    if let Some(category) = query.category.filter(|c| !c.trim().is_empty()) {
        filter = filter.with_category(category);
    }
    let products = repo.list(&filter).await?;

    Ok(Json(CatalogueResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
        categories: kpis::category_counts(&all),
        total: all.len(),
    }))
}

/// Product detail with related items
#[utoipa::path(
    get,
    path = "/catalogue/{id}",
    tag = "catalogue",
    params(
        ("id" = String, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductDetailResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn get_catalogue_product(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductDetailResponse>> {
    let not_found = || Error::NotFound {
        resource: "Product".to_string(),
        id: id.clone(),
    };
    let product_id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let mut file = state.products.lock().await;
    let mut repo = Products::new(&mut file);
    let product = repo.get_by_id(product_id).await?.ok_or_else(not_found)?;

    let related = repo
        .list(&ProductFilter::default().with_category(product.category.clone()))
        .await?
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(RELATED_PRODUCTS)
        .map(ProductResponse::from)
        .collect();

    Ok(Json(ProductDetailResponse {
        is_low_stock: product.is_low_stock(),
        product: ProductResponse::from(product),
        related,
    }))
}

/// Landing page numbers
#[utoipa::path(
    get,
    path = "/catalogue/summary",
    tag = "catalogue",
    responses(
        (status = 200, description = "Store summary", body = CatalogueSummary),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_catalogue_summary(State(state): State<AppState>) -> Result<Json<CatalogueSummary>> {
    let mut file = state.products.lock().await;
    let products = Products::new(&mut file).all().await?;

    Ok(Json(CatalogueSummary {
        total_products: products.len(),
        categories: kpis::category_counts(&products).len(),
        low_stock: kpis::low_stock_count(&products),
        total_stock_value: kpis::total_stock_value(&products),
        featured: products
            .into_iter()
            .take(FEATURED_PRODUCTS)
            .map(ProductResponse::from)
            .collect(),
    }))
}
