//! HTTP handlers for product management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    api::json::AppJson,
    api::models::{
        products::{ProductCreateRequest, ProductResponse, SuccessResponse},
        users::SessionUser,
    },
    db::{
        handlers::{Products, Repository},
        models::products::ProductCreateDBRequest,
    },
    errors::{Error, Result},
    types::abbrev_uuid,
};

fn product_not_found(id: &str) -> Error {
    Error::NotFound {
        resource: "Product".to_string(),
        id: id.to_string(),
    }
}

/// List every product, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let mut file = state.products.lock().await;
    let products = Products::new(&mut file).all().await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Add a product
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductCreateRequest,
    tag = "products",
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn create_product(
    State(state): State<AppState>,
    current_user: SessionUser,
    AppJson(request): AppJson<ProductCreateRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let create = request.validate(&state.config.limits)?;

    let mut file = state.products.lock().await;
    let product = Products::new(&mut file).create(&ProductCreateDBRequest::new(create)).await?;

    info!("Product {} ({}) added", abbrev_uuid(&product.id), product.name);
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product deleted", body = SuccessResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id, product_id = %id))]
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    // Ids that aren't UUIDs can't be stored, so they are simply not found
    let product_id = Uuid::parse_str(&id).map_err(|_| product_not_found(&id))?;

    let mut file = state.products.lock().await;
    if !Products::new(&mut file).delete(product_id).await? {
        return Err(product_not_found(&id));
    }

    info!("Product {} deleted", abbrev_uuid(&product_id));
    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::products::{ProductResponse, SuccessResponse};
    use crate::test_utils::{create_test_app, sign_in_cookie};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_create_then_list_newest_first() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        for name in ["First", "Second"] {
            let response = server
                .post("/api/products")
                .add_header("cookie", cookie.clone())
                .json(&json!({ "name": name, "price": 10.5, "quantity": 3 }))
                .await;
            response.assert_status(StatusCode::CREATED);
        }

        let response = server.get("/api/products").await;
        response.assert_status_ok();
        let products: Vec<ProductResponse> = response.json();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Second");
        assert_eq!(products[1].name, "First");
    }

    #[test_log::test(tokio::test)]
    async fn test_create_applies_defaults() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        let response = server
            .post("/api/products")
            .add_header("cookie", cookie)
            .json(&json!({ "name": " Kettle ", "price": 35, "quantity": 4 }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Kettle");
        assert_eq!(body["category"], "Other");
        assert_eq!(body["sku"], "");
        assert_eq!(body["lowStockAt"], 0);
        assert!(body["image"].is_null());
        assert!(body["createdAt"].is_string());
        assert!(body["id"].is_string());
    }

    #[test_log::test(tokio::test)]
    async fn test_create_requires_fields() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        let response = server
            .post("/api/products")
            .add_header("cookie", cookie)
            .json(&json!({ "name": "No price" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "name, price, and quantity are required.");
    }

    #[test_log::test(tokio::test)]
    async fn test_create_rejects_mistyped_body_as_json_error() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        let response = server
            .post("/api/products")
            .add_header("cookie", cookie)
            .json(&json!({ "name": "Typo", "price": "ten", "quantity": 1 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/json");
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().is_some_and(|e| e.contains("price")));
    }

    #[test_log::test(tokio::test)]
    async fn test_create_rejects_oversized_price_and_summary_survives() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        let response = server
            .post("/api/products")
            .add_header("cookie", cookie.clone())
            .json(&json!({ "name": "Big", "price": 5e28, "quantity": 2 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/products")
            .add_header("cookie", cookie.clone())
            .json(&json!({ "name": "Pricey", "price": 1e9, "quantity": 1000 }))
            .await
            .assert_status(StatusCode::CREATED);

        server.get("/api/catalogue/summary").await.assert_status_ok();
        server
            .get("/api/dashboard")
            .add_header("cookie", cookie)
            .await
            .assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_create_requires_session() {
        let (server, _state, _dir) = create_test_app().await;

        let response = server
            .post("/api/products")
            .json(&json!({ "name": "Sneaky", "price": 1, "quantity": 1 }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let products: Vec<ProductResponse> = server.get("/api/products").await.json();
        assert!(products.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_product() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        let created: ProductResponse = server
            .post("/api/products")
            .add_header("cookie", cookie.clone())
            .json(&json!({ "name": "Doomed", "price": 1, "quantity": 1 }))
            .await
            .json();

        let response = server
            .delete(&format!("/api/products/{}", created.id))
            .add_header("cookie", cookie.clone())
            .await;
        response.assert_status_ok();
        let body: SuccessResponse = response.json();
        assert!(body.success);

        let products: Vec<ProductResponse> = server.get("/api/products").await.json();
        assert!(products.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_unknown_product() {
        let (server, state, _dir) = create_test_app().await;
        let cookie = sign_in_cookie(&state.config, "1");

        for id in [uuid::Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let response = server
                .delete(&format!("/api/products/{id}"))
                .add_header("cookie", cookie.clone())
                .await;
            response.assert_status(StatusCode::NOT_FOUND);
            let body: serde_json::Value = response.json();
            assert_eq!(body["error"], "Product not found.");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_requires_session() {
        let (server, _state, _dir) = create_test_app().await;

        let response = server.delete(&format!("/api/products/{}", uuid::Uuid::new_v4())).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
