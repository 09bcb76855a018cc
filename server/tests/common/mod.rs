// server/tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use naturemate::{MemoryProductStore, Product, ProductPatch, ProductStore, StoreError, StoreResult};
use naturemate_server::{AppConfig, AppState};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

fn test_config(allow_delete_all: bool) -> Arc<AppConfig> {
  let vars: HashMap<&str, String> = HashMap::from([
    ("PRODUCT_STORE", "memory".to_string()),
    ("ALLOW_DELETE_ALL", allow_delete_all.to_string()),
  ]);
  Arc::new(AppConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config"))
}

/// State backed by a fresh in-memory store.
pub fn memory_state(allow_delete_all: bool) -> AppState {
  AppState::new(Arc::new(MemoryProductStore::new()), test_config(allow_delete_all))
}

/// Driver text that must stay in the server log and out of response bodies.
pub const DRIVER_DETAIL: &str = "connection reset by peer at 10.0.0.7:5432";

/// A store whose backend is gone: every call fails with a driver error.
pub struct FailingProductStore;

fn driver_failure<T>() -> StoreResult<T> {
  Err(StoreError::Database(sqlx::Error::Protocol(DRIVER_DETAIL.to_string())))
}

#[async_trait]
impl ProductStore for FailingProductStore {
  async fn insert(&self, _product: &Product) -> StoreResult<()> {
    driver_failure()
  }

  async fn insert_many(&self, _products: &[Product]) -> StoreResult<()> {
    driver_failure()
  }

  async fn get_by_id(&self, _id: Uuid) -> StoreResult<Product> {
    driver_failure()
  }

  async fn get_all(&self) -> StoreResult<Vec<Product>> {
    driver_failure()
  }

  async fn update(&self, _id: Uuid, _patch: &ProductPatch) -> StoreResult<()> {
    driver_failure()
  }

  async fn delete(&self, _id: Uuid) -> StoreResult<()> {
    driver_failure()
  }

  async fn delete_all(&self) -> StoreResult<u64> {
    driver_failure()
  }

  async fn health_check(&self) -> StoreResult<()> {
    driver_failure()
  }
}

pub fn failing_state() -> AppState {
  AppState::new(Arc::new(FailingProductStore), test_config(true))
}

pub fn multivitamin_body() -> Value {
  json!({
    "name": "Daily Multivitamin",
    "brand": "NatureMate",
    "category": "Vitamins",
    "price": 18.75,
    "key_benefit": "Everyday nutrition",
    "capsule_quantity": 60,
    "capsule_type": "Tablet",
    "weight": 90.0,
    "supplement_fact": ["Vitamin C 500mg", "Zinc 10mg"],
    "dosage": "1 tablet daily with food",
    "image_url": "https://cdn.example.com/multi.png",
    "fda": "10-1-55555-5-0001",
    "fda_url": null
  })
}

pub fn fish_oil_body() -> Value {
  json!({
    "name": "Fish Oil 1000",
    "brand": "Ocean Leaf",
    "category": "Omega",
    "price": 22.0,
    "key_benefit": "Heart health",
    "capsule_type": "Softgel",
    "supplement_fact": ["EPA 180mg", "DHA 120mg"],
    "dosage": "2 softgels daily"
  })
}

/// Drops `id` so a response can be compared field by field with a request body.
pub fn without_id(mut product: Value) -> Value {
  product.as_object_mut().expect("product object").remove("id");
  product
}
