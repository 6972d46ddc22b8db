use crate::application::collection::CollectionUseCase;
use crate::application::search::SearchUseCase;
use crate::domain::entities::collection::{CollectionSchema, IMG_VEC, TXT_VEC};
use crate::domain::entities::product::Product;
use crate::domain::entities::record::{NearVectorQuery, NewObject, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use serde::Serialize;
use std::sync::Arc;

/// Toy 4-D `img_vec` / `txt_vec` pairs for the two sample products.
pub const SAMPLE_VECTORS: [([f32; 4], [f32; 4]); 2] = [
    ([0.10, 0.20, 0.30, 0.40], [0.12, 0.21, 0.29, 0.41]),
    ([0.11, 0.19, 0.31, 0.39], [0.10, 0.22, 0.28, 0.42]),
];

/// Query vectors, both nearest to SKU001.
pub const IMAGE_QUERY: [f32; 4] = [0.11, 0.20, 0.29, 0.41];
pub const TEXT_QUERY: [f32; 4] = [0.11, 0.21, 0.29, 0.41];

pub const DEMO_K: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub collection: String,
    pub total: u64,
    pub image_fields: Vec<String>,
    pub image_hits: Vec<SearchHit>,
    pub text_fields: Vec<String>,
    pub text_hits: Vec<SearchHit>,
}

pub struct DemoUseCase {
    db: Arc<dyn VectorDatabase>,
    collections: CollectionUseCase,
    search: SearchUseCase,
}

impl DemoUseCase {
    pub fn new(db: Arc<dyn VectorDatabase>) -> Self {
        Self {
            collections: CollectionUseCase::new(db.clone()),
            search: SearchUseCase::new(db.clone()),
            db,
        }
    }

    pub async fn execute(&self, collection: &str) -> Result<DemoReport, DomainError> {
        self.collections
            .recreate(&CollectionSchema::product_catalog(collection))
            .await?;

        for (product, (img, txt)) in Product::sample_catalog().into_iter().zip(SAMPLE_VECTORS) {
            let object = NewObject::new(product.properties())
                .with_vector(IMG_VEC, img.to_vec())
                .with_vector(TXT_VEC, txt.to_vec());
            self.db.insert(collection, &object).await?;
        }
        let total = self.db.count(collection).await?;
        tracing::info!(collection, total, "samples inserted");

        let image_fields = fields(&["sku", "title", "brand", "price"]);
        let image_hits = self
            .search
            .near_vector(&NearVectorQuery {
                collection: collection.to_string(),
                target_vector: IMG_VEC.into(),
                vector: IMAGE_QUERY.to_vec(),
                limit: DEMO_K,
                return_properties: image_fields.clone(),
            })
            .await?;

        let text_fields = fields(&["sku", "title", "caption"]);
        let text_hits = self
            .search
            .near_vector(&NearVectorQuery {
                collection: collection.to_string(),
                target_vector: TXT_VEC.into(),
                vector: TEXT_QUERY.to_vec(),
                limit: DEMO_K,
                return_properties: text_fields.clone(),
            })
            .await?;

        Ok(DemoReport {
            collection: collection.to_string(),
            total,
            image_fields,
            image_hits,
            text_fields,
            text_hits,
        })
    }
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
