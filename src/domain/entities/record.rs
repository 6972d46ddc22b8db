use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An object about to be inserted: properties plus one vector per named slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewObject {
    pub id: Uuid,
    pub properties: Map<String, Value>,
    pub vectors: BTreeMap<String, Vec<f32>>,
}

impl NewObject {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            properties,
            vectors: BTreeMap::new(),
        }
    }

    pub fn with_vector(mut self, name: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(name.into(), vector);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub distance: f64,
    pub properties: Map<String, Value>,
}

impl SearchHit {
    /// One-line rendering used by the CLI: `dist=0.0123  sku=..  title=..`.
    pub fn summary(&self, fields: &[String]) -> String {
        let mut line = format!("dist={:.4}", self.distance);
        for f in fields {
            let v = match self.properties.get(f) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            };
            line.push_str(&format!("  {f}={v}"));
        }
        line
    }
}

#[derive(Debug, Clone)]
pub struct NearVectorQuery {
    pub collection: String,
    pub target_vector: String,
    pub vector: Vec<f32>,
    pub limit: usize,
    pub return_properties: Vec<String>,
}
