use crate::domain::entities::collection::CollectionSchema;
use crate::domain::entities::record::{NearVectorQuery, NewObject, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_database::VectorDatabase;
use crate::domain::values::distance::cosine_distance;
use crate::infrastructure::sqlite::migrations::run_migrations;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Embedded vector database. Nearest-neighbour queries scan every object of
/// the collection and rank by cosine distance.
pub struct SqliteVectorDatabase {
    conn: Mutex<Connection>,
}

impl SqliteVectorDatabase {
    pub fn open(path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        if path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        }
        Self::new(conn)
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        Self::open(":memory:")
    }

    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))
    }

    fn load_schema(conn: &Connection, name: &str) -> Result<Option<CollectionSchema>, DomainError> {
        let json: Option<String> = conn
            .query_row(
                "SELECT schema_json FROM collections WHERE name = ?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        json.map(|j| serde_json::from_str(&j).map_err(|e| DomainError::Parse(e.to_string())))
            .transpose()
    }

    fn require_schema(conn: &Connection, name: &str) -> Result<CollectionSchema, DomainError> {
        Self::load_schema(conn, name)?
            .ok_or_else(|| DomainError::Database(format!("collection '{name}' does not exist")))
    }

    fn ping_sync(&self) -> Result<(), DomainError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
        Ok(())
    }

    fn exists_sync(&self, name: &str) -> Result<bool, DomainError> {
        let conn = self.lock()?;
        Ok(Self::load_schema(&conn, name)?.is_some())
    }

    fn create_sync(&self, schema: &CollectionSchema) -> Result<(), DomainError> {
        let conn = self.lock()?;
        if Self::load_schema(&conn, &schema.name)?.is_some() {
            return Err(DomainError::Database(format!(
                "collection '{}' already exists",
                schema.name
            )));
        }
        let json = serde_json::to_string(schema).map_err(|e| DomainError::Parse(e.to_string()))?;
        conn.execute(
            "INSERT INTO collections (name, schema_json) VALUES (?1, ?2)",
            params![schema.name, json],
        )?;
        Ok(())
    }

    fn delete_sync(&self, name: &str) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM object_vectors WHERE object_id IN (SELECT id FROM objects WHERE collection = ?1)",
            params![name],
        )?;
        tx.execute("DELETE FROM objects WHERE collection = ?1", params![name])?;
        tx.execute("DELETE FROM collections WHERE name = ?1", params![name])?;
        tx.commit()?;
        Ok(())
    }

    /// Dimension of the vectors already stored under `slot`, if any.
    fn slot_dimension(
        conn: &Connection,
        collection: &str,
        slot: &str,
    ) -> Result<Option<usize>, DomainError> {
        let bytes: Option<i64> = conn
            .query_row(
                "SELECT length(v.vector)
                 FROM object_vectors v JOIN objects o ON o.id = v.object_id
                 WHERE o.collection = ?1 AND v.name = ?2
                 LIMIT 1",
                params![collection, slot],
                |r| r.get(0),
            )
            .optional()?;
        Ok(bytes.map(|b| b as usize / 4))
    }

    fn insert_sync(&self, collection: &str, object: &NewObject) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let schema = Self::require_schema(&conn, collection)?;
        schema.validate(object)?;
        for (name, vector) in &object.vectors {
            if let Some(dim) = Self::slot_dimension(&conn, collection, name)? {
                if dim != vector.len() {
                    return Err(DomainError::Schema(format!(
                        "{collection}: slot '{name}' holds {dim}-d vectors, got {}",
                        vector.len()
                    )));
                }
            }
        }

        let props = serde_json::to_string(&object.properties)
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO objects (id, collection, properties_json) VALUES (?1, ?2, ?3)",
            params![object.id.to_string(), collection, props],
        )?;
        for (name, vector) in &object.vectors {
            tx.execute(
                "INSERT INTO object_vectors (object_id, name, vector) VALUES (?1, ?2, ?3)",
                params![object.id.to_string(), name, Self::serialize_vector(vector)],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn count_sync(&self, collection: &str) -> Result<u64, DomainError> {
        let conn = self.lock()?;
        Self::require_schema(&conn, collection)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM objects WHERE collection = ?1",
            params![collection],
            |r| r.get(0),
        )?;
        Ok(count as u64)
    }

    fn near_vector_sync(&self, query: &NearVectorQuery) -> Result<Vec<SearchHit>, DomainError> {
        let conn = self.lock()?;
        let schema = Self::require_schema(&conn, &query.collection)?;
        if !schema.has_vector(&query.target_vector) {
            return Err(DomainError::Schema(format!(
                "{}: no vector slot named '{}'",
                query.collection, query.target_vector
            )));
        }

        let mut stmt = conn.prepare(
            "SELECT o.id, o.properties_json, v.vector
             FROM objects o JOIN object_vectors v ON v.object_id = o.id
             WHERE o.collection = ?1 AND v.name = ?2",
        )?;
        let rows = stmt
            .query_map(params![query.collection, query.target_vector], |row| {
                let id: String = row.get(0)?;
                let props: String = row.get(1)?;
                let blob: Vec<u8> = row.get(2)?;
                Ok((id, props, blob))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut hits = Vec::with_capacity(rows.len());
        for (id, props, blob) in rows {
            let stored = Self::deserialize_vector(&blob);
            let distance = cosine_distance(&query.vector, &stored)?;
            let all: Map<String, Value> =
                serde_json::from_str(&props).map_err(|e| DomainError::Parse(e.to_string()))?;
            hits.push(SearchHit {
                id,
                distance,
                properties: project(all, &query.return_properties),
            });
        }

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(query.limit);
        Ok(hits)
    }
}

/// Keep only the requested properties; an empty request keeps everything.
fn project(mut all: Map<String, Value>, wanted: &[String]) -> Map<String, Value> {
    if wanted.is_empty() {
        return all;
    }
    wanted
        .iter()
        .map(|k| (k.clone(), all.remove(k).unwrap_or(Value::Null)))
        .collect()
}

#[async_trait]
impl VectorDatabase for SqliteVectorDatabase {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn ready(&self) -> Result<(), DomainError> {
        self.ping_sync()
    }

    async fn meta(&self) -> Result<Value, DomainError> {
        Ok(serde_json::json!({
            "backend": "sqlite",
            "version": rusqlite::version(),
        }))
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, DomainError> {
        self.exists_sync(name)
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), DomainError> {
        self.create_sync(schema)
    }

    async fn delete_collection(&self, name: &str) -> Result<(), DomainError> {
        self.delete_sync(name)
    }

    async fn insert(&self, collection: &str, object: &NewObject) -> Result<(), DomainError> {
        self.insert_sync(collection, object)
    }

    async fn count(&self, collection: &str) -> Result<u64, DomainError> {
        self.count_sync(collection)
    }

    async fn near_vector(&self, query: &NearVectorQuery) -> Result<Vec<SearchHit>, DomainError> {
        self.near_vector_sync(query)
    }
}
