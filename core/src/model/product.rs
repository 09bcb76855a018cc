// src/model/product.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_capsule_quantity, check_non_negative, ValidationError};

/// One catalog item as stored in the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub key_benefit: String,
    pub capsule_quantity: Option<i32>,
    pub capsule_type: String,
    pub weight: Option<f64>,
    pub supplement_fact: Vec<String>,
    pub dosage: String,
    pub image_url: Option<String>,
    pub fda: Option<String>,
    pub fda_url: Option<String>,
}

/// Body of a create request. Any `id` the client sends is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub key_benefit: String,
    #[serde(default)]
    pub capsule_quantity: Option<i32>,
    pub capsule_type: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub supplement_fact: Vec<String>,
    pub dosage: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub fda: Option<String>,
    #[serde(default)]
    pub fda_url: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_non_negative("price", self.price)?;
        if let Some(weight) = self.weight {
            check_non_negative("weight", weight)?;
        }
        if let Some(quantity) = self.capsule_quantity {
            check_capsule_quantity(quantity)?;
        }
        Ok(())
    }

    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            key_benefit: self.key_benefit,
            capsule_quantity: self.capsule_quantity,
            capsule_type: self.capsule_type,
            weight: self.weight,
            supplement_fact: self.supplement_fact,
            dosage: self.dosage,
            image_url: self.image_url,
            fda: self.fda,
            fda_url: self.fda_url,
        }
    }
}
