// src/model/patch.rs

//! Partial updates for `Product`.
//!
//! A `PUT /products/{id}` body is a JSON object naming only the fields to change.
//! `ProductPatch` gives each updatable field its own slot so "absent", "explicitly
//! null" and "set to a value" stay distinct all the way down to the SQL layer:
//!
//!  - Required columns are `Option<T>`: absent keeps the stored value, a value
//!    replaces it, and `null` is rejected.
//!  - Nullable columns are [`Nullable<T>`]: absent keeps, `null` clears, a value sets.
//!
//! Values of the wrong JSON type are rejected while decoding. Nothing is coerced.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{check_capsule_quantity, check_non_negative, Product, ValidationError};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("Updating the 'id' field is not allowed")]
    ImmutableId,

    #[error("Invalid update value: {0}")]
    InvalidField(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Update slot for a column that may hold NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Keep
    }
}

impl<T> Nullable<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Nullable::Keep)
    }

    /// `None` when the column is untouched, otherwise the value to write.
    pub fn as_update(&self) -> Option<Option<&T>> {
        match self {
            Nullable::Keep => None,
            Nullable::Clear => Some(None),
            Nullable::Set(value) => Some(Some(value)),
        }
    }

    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Nullable::Keep => {}
            Nullable::Clear => *slot = None,
            Nullable::Set(value) => *slot = Some(value),
        }
    }
}

// Only called when the key is present; an absent key falls back to `Default` (Keep).
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Set(value),
            None => Nullable::Clear,
        })
    }
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "non_null")]
    pub key_benefit: Option<String>,
    #[serde(default)]
    pub capsule_quantity: Nullable<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub capsule_type: Option<String>,
    #[serde(default)]
    pub weight: Nullable<f64>,
    #[serde(default, deserialize_with = "non_null")]
    pub supplement_fact: Option<Vec<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub dosage: Option<String>,
    #[serde(default)]
    pub image_url: Nullable<String>,
    #[serde(default)]
    pub fda: Nullable<String>,
    #[serde(default)]
    pub fda_url: Nullable<String>,
}

impl ProductPatch {
    /// Decodes and validates an update body. A body carrying `id` is refused
    /// before any other key is looked at; unknown keys are ignored.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, PatchError> {
        if body.contains_key("id") {
            return Err(PatchError::ImmutableId);
        }
        let patch: ProductPatch = serde_path_to_error::deserialize(Value::Object(body))
            .map_err(|e| PatchError::InvalidField(e.to_string()))?;
        patch.validate()?;
        Ok(patch)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            check_non_negative("price", price)?;
        }
        if let Nullable::Set(weight) = self.weight {
            check_non_negative("weight", weight)?;
        }
        if let Nullable::Set(quantity) = self.capsule_quantity {
            check_capsule_quantity(quantity)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Column names this patch writes, in table order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let slots = [
            ("name", self.name.is_some()),
            ("brand", self.brand.is_some()),
            ("category", self.category.is_some()),
            ("price", self.price.is_some()),
            ("key_benefit", self.key_benefit.is_some()),
            ("capsule_quantity", !self.capsule_quantity.is_keep()),
            ("capsule_type", self.capsule_type.is_some()),
            ("weight", !self.weight.is_keep()),
            ("supplement_fact", self.supplement_fact.is_some()),
            ("dosage", self.dosage.is_some()),
            ("image_url", !self.image_url.is_keep()),
            ("fda", !self.fda.is_keep()),
            ("fda_url", !self.fda_url.is_keep()),
        ];
        slots
            .into_iter()
            .filter_map(|(column, changed)| changed.then_some(column))
            .collect()
    }

    pub fn apply_to(self, product: &mut Product) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut product.name, self.name);
        set(&mut product.brand, self.brand);
        set(&mut product.category, self.category);
        set(&mut product.price, self.price);
        set(&mut product.key_benefit, self.key_benefit);
        self.capsule_quantity.apply(&mut product.capsule_quantity);
        set(&mut product.capsule_type, self.capsule_type);
        self.weight.apply(&mut product.weight);
        set(&mut product.supplement_fact, self.supplement_fact);
        set(&mut product.dosage, self.dosage);
        self.image_url.apply(&mut product.image_url);
        self.fda.apply(&mut product.fda);
        self.fda_url.apply(&mut product.fda_url);
    }
}
