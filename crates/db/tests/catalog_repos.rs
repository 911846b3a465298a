//! Catalog repositories over the in-memory store.

use deal4bank_core::catalog::Attribute;
use deal4bank_db::collections;
use deal4bank_db::models::category::SaveCategory;
use deal4bank_db::models::service_item::SaveServiceItem;
use deal4bank_db::repositories::{CatalogRepo, CategoryRepo, ServiceItemRepo};
use deal4bank_db::{DocumentStore, MemoryStore};

fn category(name: &str) -> SaveCategory {
    SaveCategory {
        name: name.to_string(),
        ..Default::default()
    }
}

fn item(title: &str) -> SaveServiceItem {
    SaveServiceItem {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_catalog_has_heading_and_no_tabs() {
    let store = MemoryStore::new();
    let payload = CatalogRepo::load_services(&store, "Explore Our Financial Products")
        .await
        .unwrap();
    assert_eq!(payload.heading, "Explore Our Financial Products");
    assert!(payload.tabs.is_empty());
}

#[tokio::test]
async fn new_categories_append_in_order_with_defaults() {
    let store = MemoryStore::new();
    let loans = CategoryRepo::create(&store, &category("Loans")).await.unwrap();
    let cards = CategoryRepo::create(&store, &category("Cards")).await.unwrap();

    assert_eq!(loans.order, 0);
    assert_eq!(cards.order, 1);
    assert!(loans.visible);
    assert_eq!(loans.icon.as_deref(), Some("Landmark"));
    assert!(loans.attribute_keys.is_empty());

    let names: Vec<String> = CategoryRepo::list(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Loans", "Cards"]);
}

#[tokio::test]
async fn resaving_unchanged_category_leaves_document_identical() {
    let store = MemoryStore::new();
    let created = CategoryRepo::create(
        &store,
        &SaveCategory {
            attribute_keys: Some(vec!["Interest".into()]),
            ..category("Loans")
        },
    )
    .await
    .unwrap();
    let before = store
        .get(collections::CATEGORIES, &created.id)
        .await
        .unwrap()
        .unwrap();

    let resave = SaveCategory {
        id: Some(created.id.clone()),
        name: created.name.clone(),
        icon: created.icon.clone(),
        attribute_keys: Some(created.attribute_keys.clone()),
        order: Some(created.order),
        visible: Some(created.visible),
    };
    let updated = CategoryRepo::update(&store, &created.id, &resave)
        .await
        .unwrap()
        .unwrap();
    let after = store
        .get(collections::CATEGORIES, &created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated, created);
    assert_eq!(after.body, before.body);
    assert_eq!(CategoryRepo::count(&store).await.unwrap(), 1);
}

#[tokio::test]
async fn updating_missing_category_returns_none() {
    let store = MemoryStore::new();
    let result = CategoryRepo::update(&store, "nope", &category("Loans"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn items_are_scoped_to_their_category() {
    let store = MemoryStore::new();
    let loans = CategoryRepo::create(&store, &category("Loans")).await.unwrap();
    let cards = CategoryRepo::create(&store, &category("Cards")).await.unwrap();

    let home = ServiceItemRepo::create(&store, &loans.id, &item("Home Loan"))
        .await
        .unwrap();
    ServiceItemRepo::create(&store, &loans.id, &item("Car Loan"))
        .await
        .unwrap();

    assert_eq!(home.tab_id, loans.id);
    assert_eq!(home.order, 0);
    assert_eq!(home.icon_name.as_deref(), Some("User"));
    assert!(home.attributes.is_empty());
    assert_eq!(ServiceItemRepo::count(&store, &loans.id).await.unwrap(), 2);
    assert_eq!(ServiceItemRepo::count(&store, &cards.id).await.unwrap(), 0);
    assert!(ServiceItemRepo::find(&store, &cards.id, &home.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_category_leaves_items_orphaned() {
    let store = MemoryStore::new();
    let loans = CategoryRepo::create(&store, &category("Loans")).await.unwrap();
    ServiceItemRepo::create(&store, &loans.id, &item("Home Loan"))
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&store, &loans.id).await.unwrap());
    assert_eq!(ServiceItemRepo::count(&store, &loans.id).await.unwrap(), 1);

    let payload = CatalogRepo::load_services(&store, "h").await.unwrap();
    assert!(payload.tabs.is_empty());
}

#[tokio::test]
async fn aggregated_catalog_maps_titles_icons_and_visibility() {
    let store = MemoryStore::new();
    let loans = CategoryRepo::create(
        &store,
        &SaveCategory {
            attribute_keys: Some(vec!["Interest".into()]),
            icon: Some(String::new()),
            ..category("Loans")
        },
    )
    .await
    .unwrap();
    CategoryRepo::create(
        &store,
        &SaveCategory {
            visible: Some(false),
            ..category("Hidden")
        },
    )
    .await
    .unwrap();
    ServiceItemRepo::create(
        &store,
        &loans.id,
        &SaveServiceItem {
            icon_name: Some(String::new()),
            attributes: Some(vec![Attribute::new("Interest", "8.5%")]),
            ..item("Home Loan")
        },
    )
    .await
    .unwrap();

    let payload = CatalogRepo::load_services(&store, "h").await.unwrap();
    assert_eq!(payload.tabs.len(), 2);

    let tab = &payload.tabs[0];
    assert_eq!(tab.title, "Loans");
    assert_eq!(tab.icon, "Landmark");
    assert_eq!(tab.attribute_keys, vec!["Interest".to_string()]);
    assert_eq!(tab.data[0].kind, "Home Loan");
    assert_eq!(tab.data[0].icon, "Shield");
    assert_eq!(tab.data[0].attributes, vec![Attribute::new("Interest", "8.5%")]);

    assert!(!payload.tabs[1].visible);
}

#[tokio::test]
async fn store_failure_fails_the_whole_read() {
    let store = MemoryStore::new();
    CategoryRepo::create(&store, &category("Loans")).await.unwrap();
    store.set_unavailable(true);
    assert!(CatalogRepo::load_services(&store, "h").await.is_err());
}
