pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::collection::CollectionUseCase;
use crate::application::demo::{DemoReport, DemoUseCase};
use crate::application::ingest::{IngestReport, IngestUseCase};
use crate::application::readiness::{Readiness, ReadinessUseCase};
use crate::application::search::SearchUseCase;
use crate::config::{Backend, Settings};
use crate::domain::entities::collection::CollectionSchema;
use crate::domain::entities::product::ProductRow;
use crate::domain::entities::record::{NearVectorQuery, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::ImageEmbedder;
use crate::domain::ports::image_source::ImageFetcher;
use crate::domain::ports::vector_database::VectorDatabase;
use crate::infrastructure::catalog::csv_reader::CsvProductReader;
use crate::infrastructure::embeddings::clip_http::ClipHttpEmbedder;
use crate::infrastructure::images::http_fetcher::HttpImageFetcher;
use crate::infrastructure::sqlite::vector_store::SqliteVectorDatabase;
use crate::infrastructure::weaviate::client::WeaviateClient;
use std::path::Path;
use std::sync::Arc;

pub struct Byovec {
    db: Arc<dyn VectorDatabase>,
    collection: String,
    readiness_uc: ReadinessUseCase,
    collection_uc: CollectionUseCase,
    ingest_uc: IngestUseCase,
    demo_uc: DemoUseCase,
    search_uc: SearchUseCase,
}

impl Byovec {
    /// Wire the configured backend, the HTTP image fetcher and a CLIP
    /// embedder for `arch` / `pretrained` (library defaults when `None`).
    pub fn new(
        settings: &Settings,
        arch: Option<String>,
        pretrained: Option<String>,
    ) -> Result<Self, DomainError> {
        let db: Arc<dyn VectorDatabase> = match settings.backend {
            Backend::Weaviate => {
                let key = settings
                    .weaviate_api_key
                    .as_deref()
                    .ok_or_else(|| DomainError::Config("WEAVIATE_API_KEY is missing".into()))?;
                Arc::new(WeaviateClient::new(&settings.weaviate_url, key))
            }
            Backend::Sqlite => Arc::new(SqliteVectorDatabase::open(&settings.sqlite_path)?),
        };
        let embedder: Arc<dyn ImageEmbedder> =
            Arc::new(ClipHttpEmbedder::new(settings.clip_url.clone(), arch, pretrained));
        tracing::debug!(
            backend = %settings.backend,
            collection = %settings.collection,
            "configured"
        );

        Ok(Self::with_providers(
            db,
            Arc::new(HttpImageFetcher::new()),
            embedder,
            &settings.collection,
        ))
    }

    pub fn with_providers(
        db: Arc<dyn VectorDatabase>,
        fetcher: Arc<dyn ImageFetcher>,
        embedder: Arc<dyn ImageEmbedder>,
        collection: &str,
    ) -> Self {
        Self {
            readiness_uc: ReadinessUseCase::new(db.clone()),
            collection_uc: CollectionUseCase::new(db.clone()),
            ingest_uc: IngestUseCase::new(db.clone(), fetcher, embedder),
            demo_uc: DemoUseCase::new(db.clone()),
            search_uc: SearchUseCase::new(db.clone()),
            collection: collection.to_string(),
            db,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn database(&self) -> Arc<dyn VectorDatabase> {
        self.db.clone()
    }

    pub async fn ping(&self) -> Result<Readiness, DomainError> {
        self.readiness_uc.check().await
    }

    pub async fn ensure_collection(&self, schema: &CollectionSchema) -> Result<bool, DomainError> {
        self.collection_uc.ensure(schema).await
    }

    pub async fn recreate_collection(&self, schema: &CollectionSchema) -> Result<(), DomainError> {
        self.collection_uc.recreate(schema).await
    }

    pub async fn ingest_csv(&self, path: &Path, limit: usize) -> Result<IngestReport, DomainError> {
        let reader = CsvProductReader::open(path)?;
        tracing::info!(path = %path.display(), limit, "ingesting");
        self.ingest_rows(reader.rows(), limit).await
    }

    pub async fn ingest_rows<I>(&self, rows: I, limit: usize) -> Result<IngestReport, DomainError>
    where
        I: IntoIterator<Item = Result<ProductRow, DomainError>>,
    {
        self.ingest_uc.execute(&self.collection, rows, limit).await
    }

    pub async fn demo(&self) -> Result<DemoReport, DomainError> {
        self.demo_uc.execute(&self.collection).await
    }

    pub async fn search(
        &self,
        target_vector: &str,
        vector: Vec<f32>,
        limit: usize,
        return_properties: Vec<String>,
    ) -> Result<Vec<SearchHit>, DomainError> {
        self.search_uc
            .near_vector(&NearVectorQuery {
                collection: self.collection.clone(),
                target_vector: target_vector.to_string(),
                vector,
                limit,
                return_properties,
            })
            .await
    }

    pub async fn close(&self) -> Result<(), DomainError> {
        self.db.close().await
    }
}
