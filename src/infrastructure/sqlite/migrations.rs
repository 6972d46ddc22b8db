use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            schema_json TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS objects (
            id TEXT PRIMARY KEY,
            collection TEXT NOT NULL REFERENCES collections(name) ON DELETE CASCADE,
            properties_json TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS object_vectors (
            object_id TEXT NOT NULL REFERENCES objects(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            vector BLOB NOT NULL,
            PRIMARY KEY (object_id, name)
        );

        CREATE INDEX IF NOT EXISTS idx_objects_collection ON objects(collection);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
