// server/src/state.rs
use crate::config::{AppConfig, StoreBackend};
use crate::errors::{AppError, Result};
use naturemate::{MemoryProductStore, PgProductStore, ProductStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn ProductStore>, config: Arc<AppConfig>) -> Self {
    Self { store, config }
  }

  /// Builds the store the config asks for. For PostgreSQL this opens the pool,
  /// optionally creates the table, and checks connectivity once.
  pub async fn from_config(config: Arc<AppConfig>) -> Result<Self> {
    let store: Arc<dyn ProductStore> = match config.store_backend {
      StoreBackend::Memory => {
        tracing::warn!("Using the in-memory product store; data is lost on restart.");
        Arc::new(MemoryProductStore::new())
      }
      StoreBackend::Postgres => {
        let database = config
          .database
          .as_ref()
          .ok_or_else(|| AppError::Config("PostgreSQL store selected without database settings".to_string()))?;
        tracing::info!(target = %database.redacted(), "Connecting to the database...");
        let pool = PgPoolOptions::new()
          .max_connections(database.max_connections)
          .connect_with(database.connect_options()?)
          .await?;
        let store = PgProductStore::new(pool);
        if database.init_schema {
          store.init_schema().await?;
        }
        store.health_check().await?;
        tracing::info!("Successfully connected to the database.");
        Arc::new(store)
      }
    };
    Ok(Self::new(store, config))
  }
}
