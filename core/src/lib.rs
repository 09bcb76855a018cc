// src/lib.rs

//! NatureMate: the product catalog behind the supplement store API.
//!
//! This crate owns the pieces that do not depend on HTTP:
//!  - The `Product` record and the `NewProduct` create payload.
//!  - `ProductPatch`, a typed partial update with explicit per-field presence.
//!  - The `ProductStore` trait, plus a PostgreSQL implementation that owns all SQL
//!    and an in-memory implementation for development and tests.
//!
//! The web layer (`naturemate_server`) builds one store at startup and hands it to
//! every request handler.

pub mod error;
pub mod model;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{StoreError, StoreResult};

pub use crate::model::patch::{Nullable, PatchError, ProductPatch};
pub use crate::model::product::{NewProduct, Product};

pub use crate::store::memory::MemoryProductStore;
pub use crate::store::postgres::PgProductStore;
pub use crate::store::ProductStore;
