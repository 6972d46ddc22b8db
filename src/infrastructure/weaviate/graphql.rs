//! GraphQL query text and response decoding for the `Get` and `Aggregate`
//! endpoints.

use crate::domain::entities::record::{NearVectorQuery, SearchHit};
use crate::domain::error::DomainError;
use serde_json::{Map, Value};

/// Weaviate stores class names with an upper-case first letter.
pub fn class_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_identifier(kind: &str, ident: &str) -> Result<(), DomainError> {
    let mut chars = ident.chars();
    let valid = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("invalid {kind} name: {ident:?}")))
    }
}

pub fn near_vector_query(query: &NearVectorQuery) -> Result<String, DomainError> {
    let class = class_name(&query.collection);
    check_identifier("collection", &class)?;
    check_identifier("vector", &query.target_vector)?;
    for p in &query.return_properties {
        check_identifier("property", p)?;
    }
    if let Some(bad) = query.vector.iter().find(|x| !x.is_finite()) {
        return Err(DomainError::InvalidInput(format!("non-finite vector component: {bad}")));
    }

    let vector = query
        .vector
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let fields = query.return_properties.join(" ");

    Ok(format!(
        "{{ Get {{ {class}(nearVector: {{ vector: [{vector}], targetVectors: [\"{target}\"] }}, limit: {limit}) {{ {fields} _additional {{ id distance }} }} }} }}",
        target = query.target_vector,
        limit = query.limit,
    ))
}

pub fn aggregate_count_query(collection: &str) -> Result<String, DomainError> {
    let class = class_name(collection);
    check_identifier("collection", &class)?;
    Ok(format!("{{ Aggregate {{ {class} {{ meta {{ count }} }} }} }}"))
}

fn check_errors(body: &Value) -> Result<(), DomainError> {
    if let Some(errors) = body["errors"].as_array() {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors.iter().filter_map(|e| e["message"].as_str()).collect();
            return Err(DomainError::Database(format!("GraphQL: {}", messages.join("; "))));
        }
    }
    Ok(())
}

pub fn parse_get_response(collection: &str, body: &Value) -> Result<Vec<SearchHit>, DomainError> {
    check_errors(body)?;
    let class = class_name(collection);
    let items = match &body["data"]["Get"][&class] {
        Value::Array(items) => items,
        Value::Null => return Ok(vec![]),
        other => return Err(DomainError::Parse(format!("unexpected Get.{class}: {other}"))),
    };

    let mut hits = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(obj) = item else {
            return Err(DomainError::Parse(format!("unexpected hit: {item}")));
        };
        let additional = &obj.get("_additional").cloned().unwrap_or(Value::Null);
        let distance = additional["distance"]
            .as_f64()
            .ok_or_else(|| DomainError::Parse("hit without _additional.distance".into()))?;
        let id = additional["id"].as_str().unwrap_or_default().to_string();
        let properties: Map<String, Value> = obj
            .iter()
            .filter(|(k, _)| k.as_str() != "_additional")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        hits.push(SearchHit { id, distance, properties });
    }
    Ok(hits)
}

pub fn parse_count(collection: &str, body: &Value) -> Result<u64, DomainError> {
    check_errors(body)?;
    let class = class_name(collection);
    body["data"]["Aggregate"][&class][0]["meta"]["count"]
        .as_u64()
        .ok_or_else(|| DomainError::Parse(format!("missing Aggregate.{class}.meta.count")))
}
