use crate::domain::error::DomainError;

/// Turns raw image bytes into a unit-normalised embedding.
#[async_trait::async_trait]
pub trait ImageEmbedder: Send + Sync {
    async fn embed_image(&self, image: &[u8]) -> Result<Vec<f32>, DomainError>;
    fn dimension(&self) -> usize;
}
