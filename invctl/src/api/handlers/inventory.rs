//! Paged, searchable inventory table.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{
        pagination::{PageQuery, PagedResponse},
        products::ProductResponse,
        users::SessionUser,
    },
    db::handlers::{ProductFilter, ProductSearch, Products},
    errors::Result,
};

/// List products a page at a time, optionally filtered by name, SKU or category
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of products", body = PagedResponse<ProductResponse>),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn list_inventory(
    State(state): State<AppState>,
    current_user: SessionUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PagedResponse<ProductResponse>>> {
    let page = query.page();
    let page_size = state.config.inventory.page_size;
    let skip = (page - 1).saturating_mul(page_size);

    let mut filter = ProductFilter::new(skip, page_size);
    if let Some(search) = query.search() {
        filter = filter.with_search(search.to_string(), ProductSearch::Stock);
    }

    let mut file = state.products.lock().await;
    let (products, total_count) = Products::new(&mut file).page(&filter).await?;

    Ok(Json(PagedResponse::new(
        products.into_iter().map(ProductResponse::from).collect(),
        total_count,
        page,
        page_size,
    )))
}
