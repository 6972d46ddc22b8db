use crate::domain::entities::record::{NearVectorQuery, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use std::sync::Arc;

pub struct SearchUseCase {
    db: Arc<dyn VectorDatabase>,
}

impl SearchUseCase {
    pub fn new(db: Arc<dyn VectorDatabase>) -> Self {
        Self { db }
    }

    pub async fn near_vector(
        &self,
        query: &NearVectorQuery,
    ) -> Result<Vec<SearchHit>, DomainError> {
        if query.limit == 0 {
            return Err(DomainError::InvalidInput("limit must be greater than 0".into()));
        }
        if query.vector.is_empty() {
            return Err(DomainError::InvalidInput("query vector is empty".into()));
        }
        tracing::info!(
            collection = %query.collection,
            vector = %query.target_vector,
            limit = query.limit,
            "near_vector"
        );
        let hits = self.db.near_vector(query).await?;
        if hits.is_empty() {
            tracing::warn!(vector = %query.target_vector, "no results");
        }
        Ok(hits)
    }
}
