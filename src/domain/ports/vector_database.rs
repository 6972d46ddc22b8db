use crate::domain::entities::collection::CollectionSchema;
use crate::domain::entities::record::{NearVectorQuery, NewObject, SearchHit};
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// A vector database holding collections of objects with named,
/// caller-supplied vectors. Indexing and distance computation live behind
/// this trait.
#[async_trait]
pub trait VectorDatabase: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Primary readiness check.
    async fn ready(&self) -> Result<(), DomainError>;

    /// Server metadata; used as the fallback readiness check.
    async fn meta(&self) -> Result<serde_json::Value, DomainError>;

    async fn collection_exists(&self, name: &str) -> Result<bool, DomainError>;
    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), DomainError>;
    async fn delete_collection(&self, name: &str) -> Result<(), DomainError>;

    async fn insert(&self, collection: &str, object: &NewObject) -> Result<(), DomainError>;
    async fn count(&self, collection: &str) -> Result<u64, DomainError>;

    /// Hits ordered by ascending distance, at most `query.limit` of them.
    async fn near_vector(&self, query: &NearVectorQuery) -> Result<Vec<SearchHit>, DomainError>;

    /// Release the connection. Further calls are undefined.
    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
