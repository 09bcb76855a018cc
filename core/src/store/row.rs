// src/store/row.rs

use sqlx::FromRow;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::Product;

/// `products` row as the database returns it; `supplement_fact` is still JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub key_benefit: String,
    pub capsule_quantity: Option<i32>,
    pub capsule_type: String,
    pub weight: Option<f64>,
    pub supplement_fact: String,
    pub dosage: String,
    pub image_url: Option<String>,
    pub fda: Option<String>,
    pub fda_url: Option<String>,
}

pub fn encode_supplement_fact(facts: &[String]) -> StoreResult<String> {
    Ok(serde_json::to_string(facts)?)
}

pub fn decode_supplement_fact(raw: &str) -> StoreResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

impl ProductRow {
    pub fn from_product(product: &Product) -> StoreResult<Self> {
        Ok(Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price,
            key_benefit: product.key_benefit.clone(),
            capsule_quantity: product.capsule_quantity,
            capsule_type: product.capsule_type.clone(),
            weight: product.weight,
            supplement_fact: encode_supplement_fact(&product.supplement_fact)?,
            dosage: product.dosage.clone(),
            image_url: product.image_url.clone(),
            fda: product.fda.clone(),
            fda_url: product.fda_url.clone(),
        })
    }

    pub fn into_product(self) -> StoreResult<Product> {
        let supplement_fact = decode_supplement_fact(&self.supplement_fact)?;
        Ok(Product {
            id: self.id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            key_benefit: self.key_benefit,
            capsule_quantity: self.capsule_quantity,
            capsule_type: self.capsule_type,
            weight: self.weight,
            supplement_fact,
            dosage: self.dosage,
            image_url: self.image_url,
            fda: self.fda,
            fda_url: self.fda_url,
        })
    }
}
