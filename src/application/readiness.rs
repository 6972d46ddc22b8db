use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum Readiness {
    /// The ready endpoint answered.
    Ready,
    /// The ready endpoint failed but the metadata endpoint answered.
    MetaFallback { version: Option<String> },
}

pub struct ReadinessUseCase {
    db: Arc<dyn VectorDatabase>,
}

impl ReadinessUseCase {
    pub fn new(db: Arc<dyn VectorDatabase>) -> Self {
        Self { db }
    }

    /// Try `ready()`; only if that fails, fall back to `meta()`.
    pub async fn check(&self) -> Result<Readiness, DomainError> {
        match self.db.ready().await {
            Ok(()) => {
                tracing::info!(backend = self.db.name(), "ready");
                Ok(Readiness::Ready)
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.db.name(),
                    error = %e,
                    "ready check failed, trying meta"
                );
                let meta = self.db.meta().await?;
                let version = meta["version"].as_str().map(String::from);
                tracing::info!(
                    backend = self.db.name(),
                    ?version,
                    "meta answered (fallback readiness)"
                );
                Ok(Readiness::MetaFallback { version })
            }
        }
    }
}
