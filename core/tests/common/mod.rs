// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset

use naturemate::{Nullable, Product, ProductPatch, ProductStore, StoreError};
use once_cell::sync::Lazy;
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup (call once per test run if needed) ---
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

// --- Fixtures ---
pub fn vitamin_c() -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "Vitamin C + Zinc".to_string(),
        brand: "NatureMate".to_string(),
        category: "Vitamins".to_string(),
        price: 15.9,
        key_benefit: "Immune support".to_string(),
        capsule_quantity: Some(30),
        capsule_type: "Vegetable capsule".to_string(),
        weight: Some(45.0),
        supplement_fact: vec!["Vitamin C 500mg".to_string(), "Zinc 10mg".to_string()],
        dosage: "1 capsule after breakfast".to_string(),
        image_url: Some("https://cdn.example.com/vitc.png".to_string()),
        fda: Some("10-1-12345-5-0001".to_string()),
        fda_url: Some("https://fda.example.com/10-1-12345-5-0001".to_string()),
    }
}

pub fn collagen() -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "Marine Collagen".to_string(),
        brand: "Ocean Leaf".to_string(),
        category: "Beauty".to_string(),
        price: 32.0,
        key_benefit: "Skin elasticity".to_string(),
        capsule_quantity: None,
        capsule_type: "Powder".to_string(),
        weight: None,
        supplement_fact: Vec::new(),
        dosage: "1 scoop daily".to_string(),
        image_url: None,
        fda: None,
        fda_url: None,
    }
}

// --- Store contract, shared by every backend's test binary ---

pub async fn insert_then_get_returns_same_product(store: &dyn ProductStore) {
    let product = vitamin_c();
    store.insert(&product).await.unwrap();
    let fetched = store.get_by_id(product.id).await.unwrap();
    assert_eq!(fetched, product);
    assert_eq!(
        fetched.supplement_fact,
        vec!["Vitamin C 500mg".to_string(), "Zinc 10mg".to_string()]
    );
}

pub async fn missing_id_is_not_found(store: &dyn ProductStore) {
    let id = Uuid::new_v4();
    match store.get_by_id(id).await {
        Err(StoreError::NotFound { id: missing }) => assert_eq!(missing, id),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

pub async fn insert_many_stores_every_product(store: &dyn ProductStore) {
    let batch = vec![vitamin_c(), collagen(), vitamin_c()];
    store.insert_many(&batch).await.unwrap();
    let all = store.get_all().await.unwrap();
    for product in &batch {
        assert!(all.contains(product), "missing {}", product.id);
    }
}

pub async fn insert_many_is_all_or_nothing(store: &dyn ProductStore) {
    let existing = collagen();
    store.insert(&existing).await.unwrap();

    let fresh = vitamin_c();
    let mut clash = vitamin_c();
    clash.id = existing.id;
    let result = store.insert_many(&[fresh.clone(), clash]).await;

    assert!(result.is_err());
    assert!(store.get_by_id(fresh.id).await.unwrap_err().is_not_found());
    assert_eq!(store.get_by_id(existing.id).await.unwrap(), existing);
}

pub async fn duplicate_insert_is_rejected(store: &dyn ProductStore) {
    let product = collagen();
    store.insert(&product).await.unwrap();
    let err = store.insert(&product).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { id } if id == product.id), "{:?}", err);
}

pub async fn update_changes_only_patched_columns(store: &dyn ProductStore) {
    let original = vitamin_c();
    store.insert(&original).await.unwrap();

    let patch = ProductPatch {
        price: Some(19.5),
        weight: Nullable::Clear,
        image_url: Nullable::Set("https://cdn.example.com/vitc-v2.png".to_string()),
        ..Default::default()
    };
    store.update(original.id, &patch).await.unwrap();

    let updated = store.get_by_id(original.id).await.unwrap();
    let mut expected = original.clone();
    expected.price = 19.5;
    expected.weight = None;
    expected.image_url = Some("https://cdn.example.com/vitc-v2.png".to_string());
    assert_eq!(updated, expected);
}

pub async fn update_replaces_supplement_fact(store: &dyn ProductStore) {
    let original = collagen();
    store.insert(&original).await.unwrap();
    let patch = ProductPatch {
        supplement_fact: Some(vec![
            "Collagen peptides 5000mg".to_string(),
            "Vitamin C 80mg".to_string(),
        ]),
        ..Default::default()
    };
    store.update(original.id, &patch).await.unwrap();
    let updated = store.get_by_id(original.id).await.unwrap();
    assert_eq!(
        updated.supplement_fact,
        vec!["Collagen peptides 5000mg".to_string(), "Vitamin C 80mg".to_string()]
    );
    assert_eq!(updated.name, original.name);
}

pub async fn update_of_missing_id_is_not_found(store: &dyn ProductStore) {
    let patch = ProductPatch {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    assert!(store.update(Uuid::new_v4(), &patch).await.unwrap_err().is_not_found());
    assert!(store
        .update(Uuid::new_v4(), &ProductPatch::default())
        .await
        .unwrap_err()
        .is_not_found());
}

pub async fn delete_is_idempotent(store: &dyn ProductStore) {
    let product = collagen();
    store.insert(&product).await.unwrap();
    store.delete(product.id).await.unwrap();
    assert!(store.get_by_id(product.id).await.unwrap_err().is_not_found());
    store.delete(product.id).await.unwrap();
    store.delete(Uuid::new_v4()).await.unwrap();
}

pub async fn delete_all_empties_the_table(store: &dyn ProductStore) {
    store.insert_many(&[vitamin_c(), collagen()]).await.unwrap();
    let removed = store.delete_all().await.unwrap();
    assert!(removed >= 2);
    assert!(store.get_all().await.unwrap().is_empty());
}
