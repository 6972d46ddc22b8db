use crate::domain::entities::record::NewObject;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const IMG_VEC: &str = "img_vec";
pub const TXT_VEC: &str = "txt_vec";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Number,
}

impl DataType {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            DataType::Text => value.is_string(),
            DataType::Number => value.is_number(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Text => write!(f, "text"),
            DataType::Number => write!(f, "number"),
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DataType::Text),
            "number" => Ok(DataType::Number),
            _ => Err(format!("Unknown data type: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub data_type: DataType,
}

impl PropertyDef {
    pub fn text(name: &str) -> Self {
        Self { name: name.into(), data_type: DataType::Text }
    }

    pub fn number(name: &str) -> Self {
        Self { name: name.into(), data_type: DataType::Number }
    }
}

/// Where the vectors of a slot come from. Only caller-supplied vectors are
/// supported; the database never runs a vectorizer module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vectorizer {
    SelfProvided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDef {
    pub name: String,
    pub vectorizer: Vectorizer,
}

impl VectorDef {
    pub fn self_provided(name: &str) -> Self {
        Self { name: name.into(), vectorizer: Vectorizer::SelfProvided }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub properties: Vec<PropertyDef>,
    pub vectors: Vec<VectorDef>,
}

impl CollectionSchema {
    /// Schema used by image ingestion: a single `img_vec` slot.
    pub fn image_index(name: &str) -> Self {
        Self {
            name: name.into(),
            properties: vec![
                PropertyDef::text("sku"),
                PropertyDef::text("title"),
                PropertyDef::text("image_url"),
            ],
            vectors: vec![VectorDef::self_provided(IMG_VEC)],
        }
    }

    /// Full product schema with both image and text slots.
    pub fn product_catalog(name: &str) -> Self {
        Self {
            name: name.into(),
            properties: vec![
                PropertyDef::text("sku"),
                PropertyDef::text("title"),
                PropertyDef::text("brand"),
                PropertyDef::text("category"),
                PropertyDef::number("price"),
                PropertyDef::text("image_url"),
                PropertyDef::text("caption"),
            ],
            vectors: vec![
                VectorDef::self_provided(IMG_VEC),
                VectorDef::self_provided(TXT_VEC),
            ],
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_vector(&self, name: &str) -> bool {
        self.vectors.iter().any(|v| v.name == name)
    }

    /// Checks that `object` can be stored under this schema.
    pub fn validate(&self, object: &NewObject) -> Result<(), DomainError> {
        for slot in &self.vectors {
            match object.vectors.get(&slot.name) {
                None => {
                    return Err(DomainError::Schema(format!(
                        "{}: missing vector for slot '{}'",
                        self.name, slot.name
                    )))
                }
                Some(v) if v.is_empty() => {
                    return Err(DomainError::Schema(format!(
                        "{}: empty vector for slot '{}'",
                        self.name, slot.name
                    )))
                }
                Some(_) => {}
            }
        }
        if let Some(extra) = object.vectors.keys().find(|k| !self.has_vector(k)) {
            return Err(DomainError::Schema(format!(
                "{}: undeclared vector slot '{extra}'",
                self.name
            )));
        }
        for (key, value) in &object.properties {
            let def = self.property(key).ok_or_else(|| {
                DomainError::Schema(format!("{}: undeclared property '{key}'", self.name))
            })?;
            if !value.is_null() && !def.data_type.accepts(value) {
                return Err(DomainError::Schema(format!(
                    "{}: property '{key}' expects {}, got {value}",
                    self.name, def.data_type
                )));
            }
        }
        Ok(())
    }
}
