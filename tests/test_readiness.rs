use byovec::application::readiness::{Readiness, ReadinessUseCase};
use byovec::domain::entities::collection::CollectionSchema;
use byovec::domain::entities::record::{NearVectorQuery, NewObject, SearchHit};
use byovec::domain::error::DomainError;
use byovec::domain::ports::vector_database::VectorDatabase;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Only the readiness calls matter here; everything else is unreachable.
struct ReadinessDb {
    ready_ok: bool,
    meta_ok: bool,
    ready_calls: AtomicUsize,
    meta_calls: AtomicUsize,
}

impl ReadinessDb {
    fn new(ready_ok: bool, meta_ok: bool) -> Arc<Self> {
        Arc::new(Self {
            ready_ok,
            meta_ok,
            ready_calls: AtomicUsize::new(0),
            meta_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl VectorDatabase for ReadinessDb {
    fn name(&self) -> &str {
        "readiness-stub"
    }

    async fn ready(&self) -> Result<(), DomainError> {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
        if self.ready_ok {
            Ok(())
        } else {
            Err(DomainError::Http { status: 503, body: String::new() })
        }
    }

    async fn meta(&self) -> Result<serde_json::Value, DomainError> {
        self.meta_calls.fetch_add(1, Ordering::SeqCst);
        if self.meta_ok {
            Ok(serde_json::json!({ "version": "1.32.0" }))
        } else {
            Err(DomainError::Network("connection refused".into()))
        }
    }

    async fn collection_exists(&self, _name: &str) -> Result<bool, DomainError> {
        unimplemented!()
    }
    async fn create_collection(&self, _schema: &CollectionSchema) -> Result<(), DomainError> {
        unimplemented!()
    }
    async fn delete_collection(&self, _name: &str) -> Result<(), DomainError> {
        unimplemented!()
    }
    async fn insert(&self, _collection: &str, _object: &NewObject) -> Result<(), DomainError> {
        unimplemented!()
    }
    async fn count(&self, _collection: &str) -> Result<u64, DomainError> {
        unimplemented!()
    }
    async fn near_vector(&self, _query: &NearVectorQuery) -> Result<Vec<SearchHit>, DomainError> {
        unimplemented!()
    }
}

#[tokio::test]
async fn test_ready_success_skips_meta() {
    let db = ReadinessDb::new(true, true);
    let uc = ReadinessUseCase::new(db.clone());

    assert_eq!(uc.check().await.unwrap(), Readiness::Ready);
    assert_eq!(db.ready_calls.load(Ordering::SeqCst), 1);
    assert_eq!(db.meta_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ready_failure_falls_back_to_meta() {
    let db = ReadinessDb::new(false, true);
    let uc = ReadinessUseCase::new(db.clone());

    let readiness = uc.check().await.unwrap();
    assert_eq!(
        readiness,
        Readiness::MetaFallback { version: Some("1.32.0".into()) }
    );
    assert_eq!(db.meta_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ready_and_meta_failing_is_error() {
    let db = ReadinessDb::new(false, false);
    let uc = ReadinessUseCase::new(db.clone());

    let err = uc.check().await.unwrap_err();
    assert!(matches!(err, DomainError::Network(_)));
    assert_eq!(db.ready_calls.load(Ordering::SeqCst), 1);
    assert_eq!(db.meta_calls.load(Ordering::SeqCst), 1);
}
