// src/model/mod.rs

//! Data structures for catalog records and the payloads that create or change them.

pub mod patch;
pub mod product;

pub use patch::{Nullable, PatchError, ProductPatch};
pub use product::{NewProduct, Product};

/// A field value that passed JSON decoding but breaks a catalog rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError(format!(
            "'{}' must be a finite, non-negative number",
            field
        )));
    }
    Ok(())
}

pub(crate) fn check_capsule_quantity(value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError(
            "'capsule_quantity' must not be negative".to_string(),
        ));
    }
    Ok(())
}
