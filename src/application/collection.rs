use crate::domain::entities::collection::CollectionSchema;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use std::sync::Arc;

pub struct CollectionUseCase {
    db: Arc<dyn VectorDatabase>,
}

impl CollectionUseCase {
    pub fn new(db: Arc<dyn VectorDatabase>) -> Self {
        Self { db }
    }

    /// Create the collection unless it already exists. Returns whether it was created.
    pub async fn ensure(&self, schema: &CollectionSchema) -> Result<bool, DomainError> {
        if self.db.collection_exists(&schema.name).await? {
            tracing::debug!(collection = %schema.name, "collection already present");
            return Ok(false);
        }
        self.db.create_collection(schema).await?;
        tracing::info!(
            collection = %schema.name,
            vectors = schema.vectors.len(),
            "collection created"
        );
        Ok(true)
    }

    /// Drop the collection if present, then create it from `schema`.
    pub async fn recreate(&self, schema: &CollectionSchema) -> Result<(), DomainError> {
        if self.db.collection_exists(&schema.name).await? {
            tracing::info!(collection = %schema.name, "deleting existing collection");
            self.db.delete_collection(&schema.name).await?;
        }
        self.db.create_collection(schema).await?;
        tracing::info!(
            collection = %schema.name,
            vectors = schema.vectors.len(),
            "collection created"
        );
        Ok(())
    }
}
