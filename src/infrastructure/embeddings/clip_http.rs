use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::ImageEmbedder;
use crate::domain::values::distance::normalize;
use crate::infrastructure::images::http_fetcher::decode_rgb;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARCH: &str = "ViT-B-32";
pub const DEFAULT_PRETRAINED: &str = "laion2b_s34b_b79k";

/// Image embeddings from an OpenCLIP inference server.
///
/// The image is decoded and flattened to RGB locally, then posted as a
/// base64 PNG. The returned embedding is L2-normalised before use.
pub struct ClipHttpEmbedder {
    client: Client,
    base_url: String,
    arch: String,
    pretrained: String,
}

#[derive(Serialize)]
struct ClipRequest<'a> {
    model: &'a str,
    pretrained: &'a str,
    image: String,
}

#[derive(Deserialize)]
struct ClipResponse {
    embedding: Vec<f32>,
}

impl ClipHttpEmbedder {
    pub fn new(base_url: String, arch: Option<String>, pretrained: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            arch: arch.unwrap_or_else(|| DEFAULT_ARCH.to_string()),
            pretrained: pretrained.unwrap_or_else(|| DEFAULT_PRETRAINED.to_string()),
        }
    }

    fn model_dimension(arch: &str) -> usize {
        match arch {
            "RN50" | "RN101" => 1024,
            "ViT-B-32" | "ViT-B-16" => 512,
            "ViT-L-14" | "ViT-L-14-336" => 768,
            "ViT-H-14" | "ViT-g-14" => 1024,
            "ViT-bigG-14" => 1280,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl ImageEmbedder for ClipHttpEmbedder {
    async fn embed_image(&self, image: &[u8]) -> Result<Vec<f32>, DomainError> {
        let png = decode_rgb(image)?;
        let url = format!("{}/v1/embeddings/image", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&ClipRequest {
                model: &self.arch,
                pretrained: &self.pretrained,
                image: STANDARD.encode(png),
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("CLIP server error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("CLIP server {status}: {body}")));
        }

        let result: ClipResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("CLIP response: {e}")))?;
        if result.embedding.is_empty() {
            return Err(DomainError::Embedding("CLIP server returned an empty embedding".into()));
        }
        Ok(normalize(result.embedding))
    }

    /// 0 when the architecture is not in the known table.
    fn dimension(&self) -> usize {
        Self::model_dimension(&self.arch)
    }
}
