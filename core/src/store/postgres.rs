// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::row::{encode_supplement_fact, ProductRow};
use super::ProductStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Product, ProductPatch};

const SCHEMA_SQL: &str = include_str!("../../sql/products.sql");

const INSERT_PRODUCT: &str = "INSERT INTO products (id, name, brand, category, price, key_benefit, \
    capsule_quantity, capsule_type, weight, supplement_fact, dosage, image_url, fda, fda_url) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)";

// No ORDER BY: callers get the engine's order.
const SELECT_ALL: &str = "SELECT id, name, brand, category, price, key_benefit, capsule_quantity, \
    capsule_type, weight, supplement_fact, dosage, image_url, fda, fda_url FROM products";

const SELECT_BY_ID: &str = "SELECT id, name, brand, category, price, key_benefit, \
    capsule_quantity, capsule_type, weight, supplement_fact, dosage, image_url, fda, fda_url \
    FROM products WHERE id = $1";

/// `ProductStore` over a shared PostgreSQL pool. Every call checks a connection
/// out of the pool for its own duration.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `products` table if it does not exist yet.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        info!("products table is present.");
        Ok(())
    }
}

async fn insert_row<'e, E>(executor: E, product: &Product) -> StoreResult<()>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row = ProductRow::from_product(product)?;
    sqlx::query(INSERT_PRODUCT)
        .bind(row.id)
        .bind(row.name)
        .bind(row.brand)
        .bind(row.category)
        .bind(row.price)
        .bind(row.key_benefit)
        .bind(row.capsule_quantity)
        .bind(row.capsule_type)
        .bind(row.weight)
        .bind(row.supplement_fact)
        .bind(row.dosage)
        .bind(row.image_url)
        .bind(row.fda)
        .bind(row.fda_url)
        .execute(executor)
        .await
        .map_err(|e| insert_error(e, product.id))?;
    Ok(())
}

fn insert_error(err: sqlx::Error, id: Uuid) -> StoreError {
    let is_unique_violation = err
        .as_database_error()
        .map_or(false, |db_err| db_err.is_unique_violation());
    if is_unique_violation {
        StoreError::DuplicateId { id }
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(name = "store::pg::insert", skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> StoreResult<()> {
        insert_row(&self.pool, product).await
    }

    #[instrument(
        name = "store::pg::insert_many",
        skip(self, products),
        fields(count = products.len())
    )]
    async fn insert_many(&self, products: &[Product]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for product in products {
            // Returning early drops `tx`, which rolls the whole batch back.
            insert_row(&mut *tx, product).await?;
        }
        tx.commit().await?;
        debug!("Committed {} products.", products.len());
        Ok(())
    }

    #[instrument(name = "store::pg::get_by_id", skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product> {
        let row: Option<ProductRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => row.into_product(),
            None => Err(StoreError::NotFound { id }),
        }
    }

    #[instrument(name = "store::pg::get_all", skip(self))]
    async fn get_all(&self) -> StoreResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(SELECT_ALL).fetch_all(&self.pool).await?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    #[instrument(
        name = "store::pg::update",
        skip(self, patch),
        fields(columns = ?patch.changed_fields())
    )]
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<()> {
        if patch.is_empty() {
            let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            return exists.map(|_| ()).ok_or(StoreError::NotFound { id });
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE products SET ");
        let mut columns = builder.separated(", ");
        if let Some(name) = &patch.name {
            columns.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(brand) = &patch.brand {
            columns.push("brand = ").push_bind_unseparated(brand.clone());
        }
        if let Some(category) = &patch.category {
            columns.push("category = ").push_bind_unseparated(category.clone());
        }
        if let Some(price) = patch.price {
            columns.push("price = ").push_bind_unseparated(price);
        }
        if let Some(key_benefit) = &patch.key_benefit {
            columns.push("key_benefit = ").push_bind_unseparated(key_benefit.clone());
        }
        if let Some(capsule_quantity) = patch.capsule_quantity.as_update() {
            columns
                .push("capsule_quantity = ")
                .push_bind_unseparated(capsule_quantity.copied());
        }
        if let Some(capsule_type) = &patch.capsule_type {
            columns.push("capsule_type = ").push_bind_unseparated(capsule_type.clone());
        }
        if let Some(weight) = patch.weight.as_update() {
            columns.push("weight = ").push_bind_unseparated(weight.copied());
        }
        if let Some(supplement_fact) = &patch.supplement_fact {
            columns
                .push("supplement_fact = ")
                .push_bind_unseparated(encode_supplement_fact(supplement_fact)?);
        }
        if let Some(dosage) = &patch.dosage {
            columns.push("dosage = ").push_bind_unseparated(dosage.clone());
        }
        if let Some(image_url) = patch.image_url.as_update() {
            columns.push("image_url = ").push_bind_unseparated(image_url.cloned());
        }
        if let Some(fda) = patch.fda.as_update() {
            columns.push("fda = ").push_bind_unseparated(fda.cloned());
        }
        if let Some(fda_url) = patch.fda_url.as_update() {
            columns.push("fda_url = ").push_bind_unseparated(fda_url.cloned());
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }

    #[instrument(name = "store::pg::delete", skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!("Deleted {} rows.", result.rows_affected());
        Ok(())
    }

    #[instrument(name = "store::pg::delete_all", skip(self))]
    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM products").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
