//! Repository for products kept in a single JSON file.
//!
//! The whole array is read, modified and written back on every mutation. Access is serialised by
//! the mutex in [`ProductStore`], and writes go to a sibling temp file that is renamed over the
//! original so a crash never leaves a half-written array behind.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::products::{ProductCreateDBRequest, ProductDBResponse},
};
use crate::types::{ProductId, abbrev_uuid};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Which fields a free-text search matches against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSearch {
    /// name, sku and category (inventory table)
    #[default]
    Stock,
    /// name, description and sku (public catalogue)
    Catalogue,
}

/// Filter for listing products
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub skip: usize,
    pub limit: Option<usize>,
    pub search: Option<String>, // Case-insensitive substring search, fields chosen by `scope`
    pub scope: ProductSearch,
    pub category: Option<String>, // Exact category match
}

impl ProductFilter {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: String, scope: ProductSearch) -> Self {
        let search = search.trim().to_lowercase();
        self.search = (!search.is_empty()).then_some(search);
        self.scope = scope;
        self
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        let Some(needle) = &self.search else {
            return true;
        };
        let hit = |field: &str| field.to_lowercase().contains(needle.as_str());
        match self.scope {
            ProductSearch::Stock => hit(&product.name) || hit(&product.sku) || hit(&product.category),
            ProductSearch::Catalogue => hit(&product.name) || hit(&product.description) || hit(&product.sku),
        }
    }
}

// On-disk record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub low_stock_at: u32,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductDBResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            price: product.price,
            quantity: product.quantity,
            low_stock_at: product.low_stock_at,
            category: product.category,
            description: product.description,
            image: product.image,
            created_at: product.created_at,
        }
    }
}

/// Handle to the backing file. Only reachable through [`ProductStore::lock`].
#[derive(Debug)]
pub struct ProductFile {
    path: PathBuf,
}

impl ProductFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Product>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            // Deleted out from under us; treat as empty and recreate on next write
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DbError::io(&self.path, e)),
        };
        serde_json::from_slice(&raw).map_err(|e| DbError::corrupt(&self.path, e))
    }

    async fn save(&self, products: &[Product]) -> Result<()> {
        let body = serde_json::to_vec_pretty(products).map_err(|e| DbError::Other(e.into()))?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await.map_err(|e| DbError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DbError::io(&self.path, e))?;
        debug!(count = products.len(), path = %self.path.display(), "Wrote product file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "products.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

/// Shared, lock-protected product file.
#[derive(Debug, Clone)]
pub struct ProductStore {
    file: Arc<Mutex<ProductFile>>,
}

impl ProductStore {
    /// Open the store, creating the parent directory and an empty array if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await.map_err(|e| DbError::io(dir, e))?;
        }
        if !tokio::fs::try_exists(&path).await.map_err(|e| DbError::io(&path, e))? {
            tokio::fs::write(&path, "[]").await.map_err(|e| DbError::io(&path, e))?;
            tracing::info!(path = %path.display(), "Created empty product file");
        }

        Ok(Self {
            file: Arc::new(Mutex::new(ProductFile { path })),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, ProductFile> {
        self.file.lock().await
    }
}

pub struct Products<'c> {
    file: &'c mut ProductFile,
}

impl<'c> Products<'c> {
    pub fn new(file: &'c mut ProductFile) -> Self {
        Self { file }
    }

    /// One page of matching products plus the total match count, from a single read of the file.
    #[instrument(skip(self, filter), fields(skip = filter.skip, limit = ?filter.limit), err)]
    pub async fn page(&mut self, filter: &ProductFilter) -> Result<(Vec<ProductDBResponse>, usize)> {
        let products = self.file.load().await?;
        let matching: Vec<Product> = products.into_iter().filter(|p| filter.matches(p)).collect();
        let total = matching.len();

        let page = matching
            .into_iter()
            .skip(filter.skip)
            .take(filter.limit.unwrap_or(usize::MAX))
            .map(ProductDBResponse::from)
            .collect();
        Ok((page, total))
    }

    /// Every stored product, newest first.
    #[instrument(skip(self), err)]
    pub async fn all(&mut self) -> Result<Vec<ProductDBResponse>> {
        let products = self.file.load().await?;
        Ok(products.into_iter().map(ProductDBResponse::from).collect())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Products<'c> {
    type CreateRequest = ProductCreateDBRequest;
    type Response = ProductDBResponse;
    type Id = ProductId;
    type Filter = ProductFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut products = self.file.load().await?;

        let product = Product {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            sku: request.sku.clone(),
            price: request.price,
            quantity: request.quantity,
            low_stock_at: request.low_stock_at,
            category: request.category.clone(),
            description: request.description.clone(),
            image: request.image.clone(),
            created_at: Utc::now(),
        };

        // newest first
        products.insert(0, product.clone());
        self.file.save(&products).await?;

        Ok(ProductDBResponse::from(product))
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let products = self.file.load().await?;
        Ok(products.into_iter().find(|p| p.id == id).map(ProductDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(skip = filter.skip, limit = ?filter.limit), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let products = self.file.load().await?;
        Ok(products
            .into_iter()
            .filter(|p| filter.matches(p))
            .skip(filter.skip)
            .take(filter.limit.unwrap_or(usize::MAX))
            .map(ProductDBResponse::from)
            .collect())
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let mut products = self.file.load().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.file.save(&products).await?;
        Ok(true)
    }
}
