use super::graphql::{self, class_name};
use crate::domain::entities::collection::{CollectionSchema, Vectorizer};
use crate::domain::entities::record::{NearVectorQuery, NewObject, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value};
use std::time::Duration;

const READY_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Weaviate over its REST and GraphQL endpoints, authenticated with an API key.
pub struct WeaviateClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeaviateClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("byovec/", env!("CARGO_PKG_VERSION")))
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, DomainError> {
        req.bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("Weaviate: {e}")))
    }

    async fn expect_success(resp: Response) -> Result<Response, DomainError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(DomainError::Http { status, body })
    }

    async fn graphql(&self, query: String) -> Result<Value, DomainError> {
        tracing::debug!(%query, "graphql");
        let resp = self
            .send(self.client.post(self.url("/v1/graphql")).json(&json!({ "query": query })))
            .await?;
        Self::expect_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("GraphQL response: {e}")))
    }

    /// Request body for `POST /v1/schema`.
    pub fn schema_body(schema: &CollectionSchema) -> Value {
        let properties: Vec<Value> = schema
            .properties
            .iter()
            .map(|p| json!({ "name": p.name, "dataType": [p.data_type.to_string()] }))
            .collect();
        let vector_config: Map<String, Value> = schema
            .vectors
            .iter()
            .map(|v| {
                let vectorizer = match v.vectorizer {
                    Vectorizer::SelfProvided => json!({ "none": {} }),
                };
                (
                    v.name.clone(),
                    json!({ "vectorizer": vectorizer, "vectorIndexType": "hnsw" }),
                )
            })
            .collect();
        json!({
            "class": class_name(&schema.name),
            "properties": properties,
            "vectorConfig": vector_config,
        })
    }

    /// Request body for `POST /v1/objects`.
    pub fn object_body(collection: &str, object: &NewObject) -> Value {
        json!({
            "class": class_name(collection),
            "id": object.id,
            "properties": object.properties,
            "vectors": object.vectors,
        })
    }
}

#[async_trait]
impl VectorDatabase for WeaviateClient {
    fn name(&self) -> &str {
        "weaviate"
    }

    /// 200 from the ready endpoint, whatever the body.
    async fn ready(&self) -> Result<(), DomainError> {
        let resp = self
            .send(self.client.get(self.url("/v1/.well-known/ready")).timeout(READY_TIMEOUT))
            .await?;
        if resp.status() != StatusCode::OK {
            return Err(DomainError::Http {
                status: resp.status().as_u16(),
                body: "not ready".into(),
            });
        }
        Ok(())
    }

    async fn meta(&self) -> Result<Value, DomainError> {
        let resp = self
            .send(self.client.get(self.url("/v1/meta")).timeout(READY_TIMEOUT))
            .await?;
        if resp.status() != StatusCode::OK {
            return Err(DomainError::Http {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DomainError::Network(format!("Weaviate: {e}")))?;
        let text = String::from_utf8_lossy(&bytes);
        serde_json::from_str(&text).map_err(|e| DomainError::Parse(format!("meta: {e}")))
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, DomainError> {
        let path = format!("/v1/schema/{}", class_name(name));
        let resp = self.send(self.client.get(self.url(&path))).await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Self::expect_success(resp).await.map(|_| true),
        }
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), DomainError> {
        let resp = self
            .send(self.client.post(self.url("/v1/schema")).json(&Self::schema_body(schema)))
            .await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), DomainError> {
        let path = format!("/v1/schema/{}", class_name(name));
        let resp = self.send(self.client.delete(self.url(&path))).await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn insert(&self, collection: &str, object: &NewObject) -> Result<(), DomainError> {
        let resp = self
            .send(
                self.client
                    .post(self.url("/v1/objects"))
                    .json(&Self::object_body(collection, object)),
            )
            .await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64, DomainError> {
        let body = self.graphql(graphql::aggregate_count_query(collection)?).await?;
        graphql::parse_count(collection, &body)
    }

    async fn near_vector(&self, query: &NearVectorQuery) -> Result<Vec<SearchHit>, DomainError> {
        let body = self.graphql(graphql::near_vector_query(query)?).await?;
        let mut hits = graphql::parse_get_response(&query.collection, &body)?;
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(hits)
    }

    async fn close(&self) -> Result<(), DomainError> {
        tracing::debug!(url = %self.base_url, "weaviate client closed");
        Ok(())
    }
}
