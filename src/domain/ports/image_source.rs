use crate::domain::error::DomainError;

#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}
