use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Product {
    /// Minimal product as read from an ingest CSV row.
    pub fn new(sku: String, title: String, image_url: String) -> Self {
        Self {
            sku,
            title,
            brand: None,
            category: None,
            price: None,
            image_url,
            caption: None,
        }
    }

    /// Property map sent to the database. Absent optional fields are omitted.
    pub fn properties(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// The two hard-coded demo products.
    pub fn sample_catalog() -> Vec<Product> {
        vec![
            Product {
                sku: "SKU001".into(),
                title: "Pull col rond".into(),
                brand: Some("ACME".into()),
                category: Some("pulls".into()),
                price: Some(39.9),
                image_url: "https://example.com/img1.jpg".into(),
                caption: Some("a round-neck sweater".into()),
            },
            Product {
                sku: "SKU002".into(),
                title: "Pull zippé".into(),
                brand: Some("ACME".into()),
                category: Some("pulls".into()),
                price: Some(49.9),
                image_url: "https://example.com/img2.jpg".into(),
                caption: Some("a zip-front sweater".into()),
            },
        ]
    }
}

/// One raw input row, keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct ProductRow {
    fields: HashMap<String, String>,
}

impl ProductRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Value of `column`, empty when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// The product described by this row, or `None` when sku, title or
    /// image_url is empty.
    pub fn to_product(&self) -> Option<Product> {
        let sku = self.get("sku");
        let title = self.get("title");
        let url = self.get("image_url");
        if sku.is_empty() || title.is_empty() || url.is_empty() {
            return None;
        }
        Some(Product::new(sku.into(), title.into(), url.into()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProductRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
