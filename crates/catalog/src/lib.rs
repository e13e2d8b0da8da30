//! Read-only product catalog behind the lookup endpoint.

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::domain::{Product, PropertyEntry};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use tracing::debug;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Exact-match lookup. `Ok(None)` means no product carries `handle`.
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Product>>;

    /// Checks the backing store is reachable. In-memory catalogs are always healthy.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// The fixed reference catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn reference() -> Self {
        Self::new(vec![
            Product {
                handle: "sample-product-1".to_string(),
                properties: vec![
                    PropertyEntry::new("Color", "red"),
                    PropertyEntry::new("Size", "large"),
                ],
            },
            Product {
                handle: "sample-product-2".to_string(),
                properties: vec![
                    PropertyEntry::new("Material", "wood"),
                    PropertyEntry::new("Dimensions", "120x80x60"),
                ],
            },
        ])
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[async_trait]
impl ProductRepository for StaticCatalog {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Product>> {
        Ok(self
            .products
            .iter()
            .find(|product| product.handle == handle)
            .cloned())
    }
}

/// Catalog stored in SQLite. Offers no write operations.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: Pool<Sqlite>,
}

impl SqliteCatalog {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid catalog database url '{database_url}'"))?
            .create_if_missing(true);
        // every connection to an in-memory url opens its own empty database
        let max_connections = if database_url.starts_with("sqlite::memory:") {
            1
        } else {
            5
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open catalog database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply catalog migrations")?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl ProductRepository for SqliteCatalog {
    async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Product>> {
        let exists = sqlx::query("SELECT handle FROM products WHERE handle = ?")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to look up product '{handle}'"))?;
        if exists.is_none() {
            debug!(%handle, "product not in sqlite catalog");
            return Ok(None);
        }

        let rows = sqlx::query(
            "SELECT name, value FROM product_properties WHERE handle = ? ORDER BY position ASC",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to load properties for product '{handle}'"))?;

        let mut properties = Vec::with_capacity(rows.len());
        for row in rows {
            properties.push(PropertyEntry {
                name: row.try_get("name")?,
                value: row.try_get("value")?,
            });
        }

        Ok(Some(Product {
            handle: handle.to_string(),
            properties,
        }))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
