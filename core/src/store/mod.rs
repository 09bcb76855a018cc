// src/store/mod.rs

//! Data access for the `products` table.
//!
//! Handlers only see [`ProductStore`]. The server picks an implementation once at
//! startup and shares it as `Arc<dyn ProductStore>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{Product, ProductPatch};

pub mod memory;
pub mod postgres;
pub mod row;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Writes one product with all of its columns.
    async fn insert(&self, product: &Product) -> StoreResult<()>;

    /// Writes every product in input order, all or nothing.
    async fn insert_many(&self, products: &[Product]) -> StoreResult<()>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product>;

    /// All products in whatever order the backend yields them. Empty is not an error.
    async fn get_all(&self) -> StoreResult<Vec<Product>>;

    /// Writes only the columns named by `patch`. Fails with `NotFound` if no row has `id`.
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<()>;

    /// Succeeds whether or not a row matched.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Removes every product and returns how many were removed.
    async fn delete_all(&self) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;
}
