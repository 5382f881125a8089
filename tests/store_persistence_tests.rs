use stockroom::{NewProduct, ProductChanges, Store, StoreError};
use tempfile::tempdir;

// Test fixtures - sample products for the on-disk catalog

fn widget() -> NewProduct {
    NewProduct {
        code: "A100".to_string(),
        name: "Widget".to_string(),
        description: "Steel widget".to_string(),
        category: "Tools".to_string(),
        quantity: 10,
        price: 2.5,
        location: "ShelfA".to_string(),
    }
}

fn gadget() -> NewProduct {
    NewProduct {
        code: "B200".to_string(),
        name: "Gadget".to_string(),
        description: String::new(),
        category: "Electronics".to_string(),
        quantity: 3,
        price: 19.99,
        location: "ShelfB".to_string(),
    }
}

// Tests for opening the database file

#[test]
fn test_open_creates_missing_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("inventory.db");

    let store = Store::open(&path).unwrap();
    store.add(&widget()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_open_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        store.add(&widget()).unwrap();
    }
    // Opening again must not disturb existing data.
    let store = Store::open(&path).unwrap();
    assert_eq!(store.list(None, false).unwrap().len(), 1);
}

// Tests for durability across sessions

#[test]
fn test_catalog_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        store.add(&widget()).unwrap();
        store.add(&gadget()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let products = store.list(None, false).unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].code, "A100");
    assert_eq!(products[0].description, Some("Steel widget".to_string()));
    assert_eq!(products[1].code, "B200");
    assert_eq!(products[1].price, 19.99);
}

#[test]
fn test_updates_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        let id = store.add(&widget()).unwrap();
        let changes = ProductChanges {
            quantity: Some(4),
            location: Some(String::new()),
            ..Default::default()
        };
        store.update(id, &changes).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let product = store.get(1).unwrap();
    assert_eq!(product.quantity, 4);
    assert_eq!(product.location, None);
}

#[test]
fn test_ids_are_not_reused_across_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        store.add(&widget()).unwrap();
        let second = store.add(&gadget()).unwrap();
        store.delete(second).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let third = store
        .add(&NewProduct {
            code: "C300".to_string(),
            name: "Cable".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(third, 3);
}

#[test]
fn test_duplicate_code_rejected_across_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        store.add(&widget()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let err = store.add(&widget()).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateCode(_)));
}

#[test]
fn test_total_value_after_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let store = Store::open(&path).unwrap();
        store.add(&widget()).unwrap();
        store.add(&gadget()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let total = store.total_value().unwrap();
    assert!((total - (25.0 + 59.97)).abs() < 1e-9);
}
