use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WEAVIATE_URL: &str = "http://localhost:8080";
pub const DEFAULT_COLLECTION: &str = "Products";
pub const DEFAULT_SQLITE_PATH: &str = "./byovec.db";
pub const DEFAULT_CLIP_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Weaviate,
    Sqlite,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Weaviate => write!(f, "weaviate"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weaviate" => Ok(Backend::Weaviate),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!("Unknown vector backend: {s}")),
        }
    }
}

/// Runtime settings, read from the process environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: Backend,
    pub weaviate_url: String,
    pub weaviate_api_key: Option<String>,
    pub collection: String,
    pub sqlite_path: String,
    pub clip_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("VECTOR_BACKEND") {
            Some(b) => b.parse().map_err(DomainError::Config)?,
            None => Backend::Weaviate,
        };
        let weaviate_api_key = get("WEAVIATE_API_KEY");
        if backend == Backend::Weaviate && weaviate_api_key.is_none() {
            return Err(DomainError::Config("WEAVIATE_API_KEY is missing".into()));
        }

        Ok(Self {
            backend,
            weaviate_url: get("WEAVIATE_URL")
                .unwrap_or_else(|| DEFAULT_WEAVIATE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            weaviate_api_key,
            collection: get("COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into()),
            sqlite_path: get("BYOVEC_DB").unwrap_or_else(|| DEFAULT_SQLITE_PATH.into()),
            clip_url: get("CLIP_URL")
                .unwrap_or_else(|| DEFAULT_CLIP_URL.into())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal_for_weaviate() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));

        let err = Settings::from_lookup(lookup(&[("WEAVIATE_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(lookup(&[("WEAVIATE_API_KEY", "k")])).unwrap();
        assert_eq!(s.backend, Backend::Weaviate);
        assert_eq!(s.weaviate_url, DEFAULT_WEAVIATE_URL);
        assert_eq!(s.collection, "Products");
        assert_eq!(s.clip_url, DEFAULT_CLIP_URL);
    }

    #[test]
    fn test_sqlite_backend_needs_no_key() {
        let s = Settings::from_lookup(lookup(&[
            ("VECTOR_BACKEND", "SQLite"),
            ("BYOVEC_DB", "/tmp/x.db"),
            ("WEAVIATE_URL", "http://db:8080/"),
        ]))
        .unwrap();
        assert_eq!(s.backend, Backend::Sqlite);
        assert_eq!(s.sqlite_path, "/tmp/x.db");
        assert_eq!(s.weaviate_url, "http://db:8080");
    }

    #[test]
    fn test_unknown_backend() {
        assert!(Settings::from_lookup(lookup(&[("VECTOR_BACKEND", "pinecone")])).is_err());
    }
}
