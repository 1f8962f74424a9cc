//! Shared fixtures for unit and HTTP tests.

use crate::{
    AppState, Application,
    api::models::users::SessionUser,
    auth::{session, users::UserDirectory},
    config::{Config, PasswordConfig, UserConfig},
    db::{
        handlers::{ProductStore, Products, Repository},
        models::products::{ProductCreateDBRequest, ProductDBResponse},
    },
};
use axum_test::TestServer;
use rust_decimal::Decimal;
use tempfile::TempDir;

const CATEGORIES: [&str; 3] = ["Books", "Electronics", "Other"];

/// Config with the demo user, a products file inside `dir` and cheap argon2 settings.
pub fn create_test_config(dir: &TempDir) -> Config {
    let mut config = Config {
        secret_key: Some("test-secret-key-for-sessions".to_string()),
        ..Default::default()
    };
    config.data.products_file = dir.path().join("data").join("products.json");
    config.auth.users = vec![UserConfig::default()];
    config.auth.password = PasswordConfig {
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        ..Default::default()
    };
    config
}

pub async fn create_test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);

    let products = ProductStore::open(&config.data.products_file)
        .await
        .expect("Failed to open product store");
    let users = UserDirectory::from_config(&config.auth).expect("Failed to load users");
    let state = AppState::builder().config(config).products(products).users(users).build();

    (state, dir)
}

/// Full router behind the page guard. The returned state shares storage with the server.
pub async fn create_test_app() -> (TestServer, AppState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);

    let app = Application::new(config).await.expect("Failed to create application");
    let state = app.state().clone();

    (app.into_test_server(), state, dir)
}

/// A `cookie` header value carrying a valid session for `user_id`.
///
/// Users missing from the config get a made-up identity, which the server should reject.
pub fn sign_in_cookie(config: &Config, user_id: &str) -> String {
    let user = config
        .auth
        .users
        .iter()
        .find(|u| u.id == user_id)
        .map(|u| SessionUser {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
        })
        .unwrap_or_else(|| SessionUser {
            id: user_id.to_string(),
            name: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
            role: "Admin".to_string(),
        });

    let token = session::encode_session(&user, config).expect("Failed to encode session");
    format!("{}={}", config.auth.session.cookie_name, token)
}

pub async fn create_product(state: &AppState, name: &str, category: &str, quantity: u32, low_stock_at: u32) -> ProductDBResponse {
    let request = ProductCreateDBRequest {
        name: name.to_string(),
        sku: String::new(),
        price: Decimal::new(1000, 2),
        quantity,
        low_stock_at,
        category: category.to_string(),
        description: String::new(),
        image: None,
    };

    let mut file = state.products.lock().await;
    Products::new(&mut file)
        .create(&request)
        .await
        .expect("Failed to create test product")
}

/// `n` products named `Product 0..n` with categories cycling Books, Electronics, Other.
/// None are low on stock.
pub async fn seed_products(state: &AppState, n: usize) -> Vec<ProductDBResponse> {
    let mut file = state.products.lock().await;
    let mut repo = Products::new(&mut file);

    let mut created = Vec::with_capacity(n);
    for i in 0..n {
        let request = ProductCreateDBRequest {
            name: format!("Product {i}"),
            sku: format!("SKU-{i}"),
            price: Decimal::new(500 + i as i64 * 100, 2),
            quantity: 10,
            low_stock_at: 0,
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            description: String::new(),
            image: None,
        };
        created.push(repo.create(&request).await.expect("Failed to seed product"));
    }
    created
}
