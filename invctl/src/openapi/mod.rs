//! OpenAPI documentation for the `/api` surface, served at `/api/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;

/// Cookie auth used by every authenticated route.
struct SessionSecurityAddon;

impl Modify for SessionSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "SessionCookie".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "inv_session",
                    "Signed session cookie set by `POST /api/auth/signin`.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers((url = "/api", description = "Inventory API")),
    modifiers(&SessionSecurityAddon),
    paths(
        api::handlers::auth::sign_in,
        api::handlers::auth::sign_out,
        api::handlers::auth::get_current_user,
        api::handlers::products::list_products,
        api::handlers::products::create_product,
        api::handlers::products::delete_product,
        api::handlers::inventory::list_inventory,
        api::handlers::catalogue::list_catalogue,
        api::handlers::catalogue::get_catalogue_summary,
        api::handlers::catalogue::get_catalogue_product,
        api::handlers::dashboard::get_dashboard,
        api::handlers::settings::get_profile,
        api::handlers::settings::update_profile,
        api::handlers::settings::change_password,
        api::handlers::contact::submit_contact,
    ),
    components(
        schemas(
            api::models::auth::SignInRequest,
            api::models::auth::SignInBody,
            api::models::auth::SignOutBody,
            api::models::auth::ChangePasswordRequest,
            api::models::auth::MessageResponse,
            api::models::users::SessionUser,
            api::models::users::ProfileResponse,
            api::models::users::ProfileUpdate,
            api::models::products::ProductCreateRequest,
            api::models::products::ProductResponse,
            api::models::products::SuccessResponse,
            api::models::catalogue::CategoryCount,
            api::models::catalogue::CatalogueResponse,
            api::models::catalogue::ProductDetailResponse,
            api::models::catalogue::CatalogueSummary,
            api::models::dashboard::DashboardResponse,
            api::models::dashboard::DashboardKpis,
            api::models::dashboard::LowStockAlert,
            api::models::dashboard::TopProduct,
            api::models::dashboard::MonthlyRevenue,
            api::models::dashboard::MonthlyStock,
            api::models::dashboard::CategoryShare,
            api::models::contact::ContactRequest,
            api::models::contact::ContactAccepted,
        )
    ),
    tags(
        (name = "authentication", description = "Sign in and out. A successful sign in sets the `inv_session` cookie."),
        (name = "products", description = "Product list, add and delete."),
        (name = "inventory", description = "Paged stock table with search."),
        (name = "catalogue", description = "Public storefront. No session needed."),
        (name = "dashboard", description = "KPIs, low-stock alerts and chart series."),
        (name = "settings", description = "Profile and password for the signed-in user."),
        (name = "contact", description = "Contact form."),
    ),
    info(
        title = "Inventory API",
        version = "1.0.0",
        description = "Product catalogue, stock tracking and dashboard analytics.

Errors are returned as `{ \"error\": \"message\" }`. Form validation errors also carry a `fields` map.",
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_spec_lists_routes_and_cookie_scheme() {
        let spec = ApiDoc::openapi();

        for path in ["/auth/signin", "/products", "/products/{id}", "/inventory", "/catalogue/{id}", "/settings/password"] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.schemas.contains_key("ProductResponse"));
    }
}
