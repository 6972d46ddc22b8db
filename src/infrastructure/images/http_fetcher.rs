use crate::domain::error::DomainError;
use crate::domain::ports::image_source::ImageFetcher;
use async_trait::async_trait;
use image::ImageFormat;
use std::io::Cursor;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Downloads product images over HTTP(S).
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("byovec/", env!("CARGO_PKG_VERSION")))
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("GET {url}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Http { status, body });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DomainError::Network(format!("GET {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Decode any supported image format, drop alpha and re-encode as PNG.
pub fn decode_rgb(bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
    let img = image::load_from_memory(bytes).map_err(|e| DomainError::Image(e.to_string()))?;
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| DomainError::Image(e.to_string()))?;
    Ok(out.into_inner())
}
