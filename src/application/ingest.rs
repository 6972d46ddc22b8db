use crate::application::collection::CollectionUseCase;
use crate::domain::entities::collection::{CollectionSchema, IMG_VEC};
use crate::domain::entities::product::ProductRow;
use crate::domain::entities::record::NewObject;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::ImageEmbedder;
use crate::domain::ports::image_source::ImageFetcher;
use crate::domain::ports::vector_database::VectorDatabase;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Progress is logged every this many rows.
const PROGRESS_EVERY: usize = 10;

/// True when the insert of 0-based row `index` should log progress.
fn progress_due(index: usize) -> bool {
    (index + 1) % PROGRESS_EVERY == 0
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub collection: String,
    pub rows_read: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct IngestUseCase {
    db: Arc<dyn VectorDatabase>,
    fetcher: Arc<dyn ImageFetcher>,
    embedder: Arc<dyn ImageEmbedder>,
    collections: CollectionUseCase,
}

impl IngestUseCase {
    pub fn new(
        db: Arc<dyn VectorDatabase>,
        fetcher: Arc<dyn ImageFetcher>,
        embedder: Arc<dyn ImageEmbedder>,
    ) -> Self {
        Self {
            collections: CollectionUseCase::new(db.clone()),
            db,
            fetcher,
            embedder,
        }
    }

    /// Embed and insert the images described by `rows`.
    ///
    /// `limit` caps the number of rows looked at (skipped rows included);
    /// 0 means no cap. Rows lacking sku, title or image_url are skipped.
    /// Any fetch, embedding or insert failure aborts the run.
    pub async fn execute<I>(
        &self,
        collection: &str,
        rows: I,
        limit: usize,
    ) -> Result<IngestReport, DomainError>
    where
        I: IntoIterator<Item = Result<ProductRow, DomainError>>,
    {
        let started_at = Utc::now();
        let schema = CollectionSchema::image_index(collection);
        self.collections.ensure(&schema).await?;

        let expected_dim = self.embedder.dimension();
        let mut rows_read = 0;
        let mut inserted = 0;
        let mut skipped = 0;

        for (i, row) in rows.into_iter().enumerate() {
            if limit > 0 && i >= limit {
                break;
            }
            let row = row?;
            rows_read += 1;

            let Some(product) = row.to_product() else {
                tracing::debug!(row = i, "skipping incomplete row");
                skipped += 1;
                continue;
            };

            let image = self.fetcher.fetch(&product.image_url).await?;
            let vector = self.embedder.embed_image(&image).await?;
            if expected_dim > 0 && vector.len() != expected_dim {
                return Err(DomainError::Embedding(format!(
                    "expected {expected_dim} dimensions, got {}",
                    vector.len()
                )));
            }

            let object = NewObject::new(product.properties()).with_vector(IMG_VEC, vector);
            self.db.insert(collection, &object).await?;
            inserted += 1;
            tracing::debug!(sku = %product.sku, id = %object.id, "inserted");

            if progress_due(i) {
                tracing::info!("Inserted {}", i + 1);
            }
        }

        tracing::info!(collection, inserted, skipped, "ingest done");
        Ok(IngestReport {
            collection: collection.to_string(),
            rows_read,
            inserted,
            skipped,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_every_tenth_row() {
        let due: Vec<usize> = (0..35).filter(|i| progress_due(*i)).collect();
        assert_eq!(due, vec![9, 19, 29]);
        assert!(!progress_due(0));
        assert!(!progress_due(10));
    }
}
