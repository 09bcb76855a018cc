// src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::row::ProductRow;
use super::ProductStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Product, ProductPatch};

/// In-process `ProductStore` for development and tests.
///
/// Rows are kept as [`ProductRow`]s so `supplement_fact` goes through the same
/// JSON text encoding as the PostgreSQL store. `get_all` returns insertion order.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: RwLock<Vec<ProductRow>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    #[instrument(
        name = "store::memory::insert",
        skip(self, product),
        fields(product_id = %product.id)
    )]
    async fn insert(&self, product: &Product) -> StoreResult<()> {
        let row = ProductRow::from_product(product)?;
        let mut rows = self.rows.write();
        if rows.iter().any(|existing| existing.id == row.id) {
            return Err(StoreError::DuplicateId { id: row.id });
        }
        rows.push(row);
        Ok(())
    }

    #[instrument(
        name = "store::memory::insert_many",
        skip(self, products),
        fields(count = products.len())
    )]
    async fn insert_many(&self, products: &[Product]) -> StoreResult<()> {
        let batch = products
            .iter()
            .map(ProductRow::from_product)
            .collect::<StoreResult<Vec<_>>>()?;

        let mut rows = self.rows.write();
        let mut seen: HashSet<Uuid> = rows.iter().map(|row| row.id).collect();
        // Check the whole batch before writing so a conflict leaves nothing behind.
        for row in &batch {
            if !seen.insert(row.id) {
                return Err(StoreError::DuplicateId { id: row.id });
            }
        }
        rows.extend(batch);
        debug!("Stored {} products.", products.len());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product> {
        let row = self.rows.read().iter().find(|row| row.id == id).cloned();
        match row {
            Some(row) => row.into_product(),
            None => Err(StoreError::NotFound { id }),
        }
    }

    async fn get_all(&self) -> StoreResult<Vec<Product>> {
        let rows = self.rows.read().clone();
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    #[instrument(
        name = "store::memory::update",
        skip(self, patch),
        fields(columns = ?patch.changed_fields())
    )]
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<()> {
        let mut rows = self.rows.write();
        let slot = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound { id })?;
        let mut product = slot.clone().into_product()?;
        patch.clone().apply_to(&mut product);
        *slot = ProductRow::from_product(&product)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.rows.write().retain(|row| row.id != id);
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut rows = self.rows.write();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
