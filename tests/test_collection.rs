mod common;

use byovec::domain::entities::collection::{CollectionSchema, IMG_VEC};
use byovec::domain::entities::record::NewObject;
use byovec::domain::ports::vector_database::VectorDatabase;
use common::setup;

#[tokio::test]
async fn test_ensure_is_idempotent() {
    let h = setup();
    let schema = CollectionSchema::image_index("Products");

    assert!(h.app.ensure_collection(&schema).await.unwrap());
    assert!(!h.app.ensure_collection(&schema).await.unwrap());
    assert!(!h.app.ensure_collection(&schema).await.unwrap());
    assert!(h.db.collection_exists("Products").await.unwrap());
}

#[tokio::test]
async fn test_ensure_keeps_existing_objects() {
    let h = setup();
    let schema = CollectionSchema::image_index("Products");
    h.app.ensure_collection(&schema).await.unwrap();

    let mut props = serde_json::Map::new();
    props.insert("sku".into(), "A1".into());
    h.db.insert("Products", &NewObject::new(props).with_vector(IMG_VEC, vec![1.0, 0.0]))
        .await
        .unwrap();

    h.app.ensure_collection(&schema).await.unwrap();
    assert_eq!(h.db.count("Products").await.unwrap(), 1);
}

#[tokio::test]
async fn test_recreate_drops_objects_and_replaces_schema() {
    let h = setup();
    h.app
        .ensure_collection(&CollectionSchema::image_index("Products"))
        .await
        .unwrap();
    let mut props = serde_json::Map::new();
    props.insert("sku".into(), "A1".into());
    h.db.insert("Products", &NewObject::new(props).with_vector(IMG_VEC, vec![1.0, 0.0]))
        .await
        .unwrap();

    h.app
        .recreate_collection(&CollectionSchema::product_catalog("Products"))
        .await
        .unwrap();
    assert_eq!(h.db.count("Products").await.unwrap(), 0);

    // The new schema requires txt_vec as well.
    let mut props = serde_json::Map::new();
    props.insert("sku".into(), "A2".into());
    let err = h
        .db
        .insert("Products", &NewObject::new(props).with_vector(IMG_VEC, vec![1.0, 0.0]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("txt_vec"));
}

#[tokio::test]
async fn test_recreate_on_missing_collection_just_creates() {
    let h = setup();
    h.app
        .recreate_collection(&CollectionSchema::product_catalog("Fresh"))
        .await
        .unwrap();
    assert!(h.db.collection_exists("Fresh").await.unwrap());
}
