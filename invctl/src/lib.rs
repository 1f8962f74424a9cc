//! # invctl: inventory control service
//!
//! `invctl` serves a small inventory web application: a public product catalogue, an
//! authenticated stock table with search and pagination, product add and delete, a dashboard
//! of stock KPIs and sales charts, and account settings. Products live in a single JSON file;
//! users come from configuration.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum). Everything the browser app talks
//! to is mounted under `/api`; every other path is served from the embedded frontend bundle with
//! a single-page-app fallback.
//!
//! Page navigations pass through [`auth::middleware::page_guard_middleware`] before routing.
//! It redirects anonymous visitors away from protected pages (`/dashboard`, `/inventory`,
//! `/add-product`, `/settings`) to `/signin?from=<path>`, and sends signed-in users who open
//! `/signin` to the dashboard. API handlers do their own authentication by taking a
//! [`SessionUser`](api::models::users::SessionUser) argument, which rejects requests without a
//! valid signed session cookie with 401.
//!
//! ### Core Components
//!
//! - **[`api`]**: handlers and request/response models
//! - **[`auth`]**: session cookies (signed JWT), password hashing, the user directory and the page guard
//! - **[`db`]**: the JSON-file product repository
//! - **[`analytics`]**: dashboard KPIs and the seeded chart series
//! - **[`config`]**: YAML + environment configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use invctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = invctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     invctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use crate::{
    auth::{middleware::page_guard_middleware, users::UserDirectory},
    config::CorsOrigin,
    db::handlers::ProductStore,
    errors::Error,
    openapi::ApiDoc,
};
use axum::{
    Json, Router, ServiceExt,
    extract::DefaultBodyLimit,
    http::{self, HeaderValue, Uri},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ProductId, UserId};

/// Shared state handed to every handler.
///
/// - `config`: application configuration
/// - `products`: the lock-protected product file
/// - `users`: accounts that may sign in, with their current profile and password hash
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .products(ProductStore::open("data/products.json").await?)
///     .users(UserDirectory::from_config(&config.auth)?)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub products: ProductStore,
    pub users: UserDirectory,
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PATCH, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.auth.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.auth.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Unknown `/api` paths get a JSON 404 rather than the frontend bundle.
async fn api_not_found(uri: Uri) -> Error {
    Error::NotFound {
        resource: "Route".to_string(),
        id: uri.path().to_string(),
    }
}

/// Build the application router.
///
/// - `/api/*` handlers, with the request body limit from `limits.max_body_bytes`
/// - `/api/docs` and `/api/openapi.json`
/// - `/healthz`
/// - optional Prometheus metrics at `/internal/metrics`
/// - embedded frontend with SPA fallback for everything else
/// - CORS and request tracing layers
///
/// The page guard is applied outside the router in [`Application`] so it sees the raw path.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use api::handlers::{auth, catalogue, contact, dashboard, inventory, products, settings, static_assets};

    let api_routes = Router::new()
        // Session
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
        .route("/auth/me", get(auth::get_current_user))
        // Products
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/{id}", delete(products::delete_product))
        .route("/inventory", get(inventory::list_inventory))
        // Public storefront
        .route("/catalogue", get(catalogue::list_catalogue))
        .route("/catalogue/summary", get(catalogue::get_catalogue_summary))
        .route("/catalogue/{id}", get(catalogue::get_catalogue_product))
        .route("/contact", post(contact::submit_contact))
        // Signed-in pages
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/settings/profile", get(settings::get_profile).patch(settings::update_profile))
        .route("/settings/password", post(settings::change_password))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .fallback(api_not_found)
        .layer(DefaultBodyLimit::max(state.config.limits.max_body_bytes))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .fallback(static_assets::serve_embedded_asset);

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: state plus router.
///
/// 1. **Create**: [`Application::new`] opens the product file and loads users
/// 2. **Serve**: [`Application::serve`] binds the port and handles requests until the
///    shutdown future resolves
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting inventory service with configuration: {:#?}", config);

        let products = ProductStore::open(&config.data.products_file).await?;
        let users = UserDirectory::from_config(&config.auth)?;
        info!(
            "Loaded {} user(s), products stored at {}",
            config.auth.users.len(),
            config.data.products_file.display()
        );

        let app_state = AppState::builder()
            .config(config.clone())
            .products(products)
            .users(users)
            .build();
        let router = build_router(&app_state)?;

        Ok(Self { router, app_state, config })
    }

    pub fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        let middleware = from_fn_with_state(self.app_state, page_guard_middleware);
        let service = middleware.layer(self.router).into_make_service();
        axum_test::TestServer::new(service).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Inventory service listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Apply the page guard before path matching
        let middleware = from_fn_with_state(self.app_state, page_guard_middleware);
        let service = middleware.layer(self.router);

        axum::serve(listener, service.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
