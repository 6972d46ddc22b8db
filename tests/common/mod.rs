//! Shared test helpers.
#![allow(dead_code)]

use byovec::domain::entities::product::ProductRow;
use byovec::domain::error::DomainError;
use byovec::domain::ports::embedding_port::ImageEmbedder;
use byovec::domain::ports::image_source::ImageFetcher;
use byovec::infrastructure::sqlite::vector_store::SqliteVectorDatabase;
use byovec::Byovec;
use std::sync::{Arc, Mutex};

/// Serves the URL itself as the image bytes and records every request.
#[derive(Default)]
pub struct StubFetcher {
    pub fetched: Mutex<Vec<String>>,
    pub fail_on: Option<String>,
}

impl StubFetcher {
    pub fn failing_on(url: &str) -> Self {
        Self {
            fetched: Mutex::new(vec![]),
            fail_on: Some(url.to_string()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.fail_on.as_deref() == Some(url) {
            return Err(DomainError::Http { status: 404, body: "not found".into() });
        }
        Ok(url.as_bytes().to_vec())
    }
}

/// Deterministic 4-D "embedding" derived from the image bytes.
pub struct StubEmbedder;

#[async_trait::async_trait]
impl ImageEmbedder for StubEmbedder {
    async fn embed_image(&self, image: &[u8]) -> Result<Vec<f32>, DomainError> {
        let sum: u32 = image.iter().map(|b| *b as u32).sum();
        Ok(vec![image.len() as f32, (sum % 97) as f32, 1.0, 0.5])
    }

    fn dimension(&self) -> usize {
        4
    }
}

/// Claims 4 dimensions but returns 3.
pub struct ShortEmbedder;

#[async_trait::async_trait]
impl ImageEmbedder for ShortEmbedder {
    async fn embed_image(&self, _image: &[u8]) -> Result<Vec<f32>, DomainError> {
        Ok(vec![1.0, 0.0, 0.0])
    }

    fn dimension(&self) -> usize {
        4
    }
}

pub struct Harness {
    pub app: Byovec,
    pub db: Arc<SqliteVectorDatabase>,
    pub fetcher: Arc<StubFetcher>,
}

pub fn setup() -> Harness {
    setup_with(StubFetcher::default())
}

pub fn setup_with(fetcher: StubFetcher) -> Harness {
    setup_with_embedder(fetcher, Arc::new(StubEmbedder))
}

pub fn setup_with_embedder(fetcher: StubFetcher, embedder: Arc<dyn ImageEmbedder>) -> Harness {
    let db = Arc::new(SqliteVectorDatabase::in_memory().unwrap());
    let fetcher = Arc::new(fetcher);
    let app = Byovec::with_providers(db.clone(), fetcher.clone(), embedder, "Products");
    Harness { app, db, fetcher }
}

pub fn row(sku: &str, title: &str, image_url: &str) -> Result<ProductRow, DomainError> {
    Ok([("sku", sku), ("title", title), ("image_url", image_url)]
        .into_iter()
        .collect())
}
